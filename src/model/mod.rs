pub use self::{
    chart::Chart,
    hit_object::{Checkpoint, CheckpointKind, HitObject, HitObjectKind, Note, Slider, Spinner},
};

mod chart;
mod hit_object;
