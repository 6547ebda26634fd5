/// Maps an iteration count to an 8-bit grey level.
pub trait IntensityMap<T> {
    fn intensity(&self, value: T) -> u8;

    fn display_name(&self) -> &str;
}
