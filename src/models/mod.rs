pub mod dispatch;
pub mod image;
pub mod notification;

pub use dispatch::{ClientPayload, DispatchEvent, IMAGE_PUSHED_EVENT};
pub use image::ImageReference;
pub use notification::{PushData, PushNotification, RepositoryInfo};
