//! Extension traits

mod depot;
mod request;
mod result;
mod timestamp;

pub(crate) use depot::DepotExt as _;
pub(crate) use request::RequestExt as _;
pub(crate) use result::ResultExt as _;
pub(crate) use timestamp::TimestampExt as _;
