mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from redball for tests
pub use redball::{
    Detection, DetectionPipeline, DetectorConfig, Frame, FrameLoop, FrameSource, HsvBand, Mask,
    Presenter, PresenterControl, Region,
};
