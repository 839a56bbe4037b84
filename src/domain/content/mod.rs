pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{ContentItem, NewContentItem};
pub use repository::{ContentReadRepository, ContentWriteRepository};
pub use value_objects::{ActorId, ContentBody, ContentItemId, ContentTitle};
