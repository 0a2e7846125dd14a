// Domain layer - Validated props records and the decoders that build them
pub mod console_props;
pub mod decode;
pub mod errors;
pub mod item;
pub mod variants;
