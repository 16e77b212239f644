pub mod client;
pub mod image;
pub mod types;

pub use self::client::GeminiHttpClient;
pub use self::image::{extract_image, GeminiImageClient};
