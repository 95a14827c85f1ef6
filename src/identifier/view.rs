use crate::identifier::core::{Phase, State};
use crate::model_provider::interface::Classification;
use crate::staged_image::StagedImage;

/// The single primary control shown for a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    LoadModel,
    Busy(&'static str),
    PickImage,
    Identify,
    Reset,
    Retry,
}

impl Affordance {
    pub fn accepts_input(&self) -> bool {
        !matches!(self, Affordance::Busy(_))
    }
}

pub fn affordance(phase: Phase) -> Affordance {
    match phase {
        Phase::Idle => Affordance::LoadModel,
        Phase::ModelLoading => Affordance::Busy("Loading..."),
        Phase::LoadFailed => Affordance::Retry,
        Phase::ModelReady => Affordance::PickImage,
        Phase::ImageStaged => Affordance::Identify,
        Phase::Classifying => Affordance::Busy("Identifying..."),
        Phase::ClassifyFailed => Affordance::Retry,
        Phase::Complete => Affordance::Reset,
    }
}

pub fn is_preview_visible(phase: Phase) -> bool {
    matches!(phase, Phase::ImageStaged | Phase::Complete)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Preview<'a> {
    Image(&'a StagedImage),
    /// Preview slot is shown but nothing was staged.
    Empty,
}

/// `cat: %83.00`
pub fn format_result_row(classification: &Classification) -> String {
    format!(
        "{}: %{:.2}",
        classification.label,
        f64::from(classification.confidence) * 100.0
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct View<'a> {
    pub affordance: Affordance,
    pub preview: Option<Preview<'a>>,
    pub results: Vec<String>,
    pub error: Option<&'a str>,
    pub model_name: Option<&'a str>,
}

pub fn view(state: &State) -> View<'_> {
    let phase = state.phase();

    let preview = if is_preview_visible(phase) {
        Some(match state.staged_image() {
            Some(image) => Preview::Image(image),
            None => Preview::Empty,
        })
    } else {
        None
    };

    View {
        affordance: affordance(phase),
        preview,
        results: state.results().iter().map(format_result_row).collect(),
        error: state.error(),
        model_name: state.model().map(|model| model.name()),
    }
}

impl View<'_> {
    pub fn is_results_visible(&self) -> bool {
        !self.results.is_empty()
    }
}
