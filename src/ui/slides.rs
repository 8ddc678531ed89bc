//! One builder per slide. Each is a pure function of the payload and the
//! content width.

mod accuracy;
mod compare;
mod hook;
mod journey;
mod peak_performance;
pub mod persona;
mod quirks;
mod summary;
mod timing;
mod warmup;
mod year_in_numbers;

use crate::payload::StatisticsPayload;
use crate::slides::SlideKind;
use crate::ui::section::SlideContent;

pub fn build(kind: SlideKind, data: &StatisticsPayload, width: u16) -> SlideContent {
    match kind {
        SlideKind::Hook => hook::build(data, width),
        SlideKind::YearInNumbers => year_in_numbers::build(data, width),
        SlideKind::Journey => journey::build(data, width),
        SlideKind::PeakPerformance => peak_performance::build(data, width),
        SlideKind::Timing => timing::build(data, width),
        SlideKind::Persona => persona::build(data, width),
        SlideKind::Warmup => warmup::build(data, width),
        SlideKind::Quirks => quirks::build(data, width),
        SlideKind::Accuracy => accuracy::build(data, width),
        SlideKind::Compare => compare::build(data, width),
        SlideKind::Summary => summary::build(data, width),
    }
}

#[cfg(test)]
pub(crate) fn demo() -> StatisticsPayload {
    StatisticsPayload::from_json(crate::demo::payload_bytes()).unwrap()
}
