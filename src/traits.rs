use palette::cast::ArrayCast;

/// A color type that can be viewed as an array of `N` components.
///
/// This is automatically implemented for any [`palette`] color that casts to `[Component; N]`,
/// like [`Srgb<u8>`](palette::Srgb), as well as plain arrays like `[u8; 3]`.
/// All algorithms in this crate work on `u8` components with `N = 3`,
/// where the components are taken to be red, green, and blue in that order.
pub trait ColorComponents<Component, const N: usize>:
    ArrayCast<Array = [Component; N]> + Copy + 'static
{
}

impl<Color, Component, const N: usize> ColorComponents<Component, N> for Color where
    Color: ArrayCast<Array = [Component; N]> + Copy + 'static
{
}
