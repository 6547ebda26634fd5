use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::grayscale_field::GrayscaleField;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes binary greyscale PGM (`P5`) files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgmFilePresenter {}

impl PgmFilePresenter {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    pub fn encode<W: Write>(&self, field: &GrayscaleField, mut writer: W) -> std::io::Result<()> {
        let rect = field.pixel_rect();

        // P5 is binary greyscale: magic, width height, max value, then one byte per pixel
        writeln!(writer, "P5")?;
        writeln!(writer, "{} {}", rect.width(), rect.height())?;
        writeln!(writer, "255")?;
        writer.write_all(field.intensities())?;
        writer.flush()
    }
}

impl FilePresenterPort for PgmFilePresenter {
    fn present(&self, field: &GrayscaleField, filepath: impl AsRef<Path>) -> std::io::Result<()> {
        let file = std::fs::File::create(filepath)?;
        self.encode(field, BufWriter::new(file))
    }

    fn extension(&self) -> &'static str {
        "pgm"
    }
}
