pub mod config;
pub mod detection;
pub mod models;
pub mod pipeline;
pub mod presenter;
pub mod source;

pub use config::{DetectorConfig, HsvBand};
pub use models::{Detection, Frame, FrameAnalysis, Mask, Region};
pub use detection::DetectionPipeline;
pub use pipeline::{
    FrameLoop, FrameSource, LoopEvent, LoopState, LoopSummary, Presenter, PresenterControl,
    StopReason,
};
pub use presenter::ConsolePresenter;
pub use source::ImageSequenceSource;
