/// Screen direction a slide enters and leaves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum SlideKind {
    Hook,
    YearInNumbers,
    Journey,
    PeakPerformance,
    Timing,
    Persona,
    Warmup,
    Quirks,
    Accuracy,
    Compare,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideDescriptor {
    pub kind: SlideKind,
    pub label: &'static str,
    pub axis: Axis,
}

const fn slide(kind: SlideKind, label: &'static str, axis: Axis) -> SlideDescriptor {
    SlideDescriptor { kind, label, axis }
}

/// Presentation order of the wrapped sequence.
pub const SLIDES: [SlideDescriptor; 11] = [
    slide(SlideKind::Hook, "Hook", Axis::Vertical),
    slide(SlideKind::YearInNumbers, "Year in Numbers", Axis::Vertical),
    slide(SlideKind::Journey, "Journey", Axis::Horizontal),
    slide(SlideKind::PeakPerformance, "Peak Performance", Axis::Horizontal),
    slide(SlideKind::Timing, "Best Hours", Axis::Vertical),
    slide(SlideKind::Persona, "Persona", Axis::Vertical),
    slide(SlideKind::Warmup, "Warmup", Axis::Horizontal),
    slide(SlideKind::Quirks, "Quirks", Axis::Horizontal),
    slide(SlideKind::Accuracy, "Accuracy", Axis::Vertical),
    slide(SlideKind::Compare, "Compare", Axis::Vertical),
    slide(SlideKind::Summary, "Summary", Axis::Vertical),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_fixed() {
        assert_eq!(SLIDES.len(), 11);
        assert_eq!(SLIDES[0].kind, SlideKind::Hook);
        assert_eq!(SLIDES[10].kind, SlideKind::Summary);
        assert_eq!(SLIDES[4].label, "Best Hours");
    }

    #[test]
    fn horizontal_slides() {
        let horizontal: Vec<SlideKind> = SLIDES
            .iter()
            .filter(|s| s.axis == Axis::Horizontal)
            .map(|s| s.kind)
            .collect();
        assert_eq!(
            horizontal,
            vec![
                SlideKind::Journey,
                SlideKind::PeakPerformance,
                SlideKind::Warmup,
                SlideKind::Quirks
            ]
        );
    }
}
