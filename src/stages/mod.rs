pub mod stage0_normalize;
pub mod stage1_merge;
pub mod stage2_assign;
pub mod stage3_repair;
pub mod stage4_render;

pub use stage0_normalize::*;
pub use stage1_merge::*;
pub use stage2_assign::*;
pub use stage3_repair::*;
pub use stage4_render::*;
