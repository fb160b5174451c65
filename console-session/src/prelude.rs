pub use crate::bus::SessionBus;
pub use lifeline::{Bus, Lifeline, Service, Task};
pub use log::{debug, error, info, warn};
pub use postage::{sink::Sink, stream::Stream};
