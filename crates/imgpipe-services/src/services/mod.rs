#[cfg(feature = "dynamodb")]
pub mod dynamodb;
#[cfg(feature = "sns")]
pub mod sns;
