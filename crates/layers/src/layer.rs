#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Marker,
    Boundary,
    Circle,
    Line,
    Label,
    Control,
}

pub trait Layer {
    fn kind(&self) -> LayerKind;

    /// Name listed in the layer control; unnamed layers are not toggleable.
    fn name(&self) -> Option<&str> {
        None
    }
}
