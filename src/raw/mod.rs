mod arena;
mod balance;
mod bulk;
mod chain;
mod handle;
mod insert;
mod node;
mod query;
mod raw_osrb_tree;
mod remove;
mod size;
mod traverse;
mod validate;

pub(crate) use arena::Arena;
pub(crate) use chain::{Cell, Chain};
pub(crate) use handle::Handle;
pub(crate) use node::Node;
pub(crate) use raw_osrb_tree::RawOSRBTree;
