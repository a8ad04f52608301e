use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// The input table could not be read or was malformed
    Csv(#[from] csv::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse a font face
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to decode or encode an image
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// [qrcode] failed to encode a URL
    Qr(#[from] qrcode::types::QrError),

    #[error("record {0:?} has an empty URL")]
    /// A record's URL column was blank, so no code can be generated for it
    EmptyUrl(String),
}
