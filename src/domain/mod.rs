mod media_stream;
mod video_reference;

pub use media_stream::{MediaStream, StreamDescriptor, StreamKind};
pub use video_reference::VideoReference;
