mod adapter;
mod status_page;

pub use adapter::HyperRelayAdapter;
