/// UI layer: sidebar filter widgets and the derived-view renderers.

pub mod map;
pub mod metrics;
pub mod panels;
pub mod pie;
