mod opaque;
mod output;
mod value;

pub use opaque::{Opaque, PluginParams};
pub use output::{Chunk, Output};
pub use value::{Callback, Object, RenderProps, Value, Values};
pub(crate) use value::CallbackFn;
