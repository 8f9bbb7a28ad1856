//! Pull-based frame computation.
//!
//! The host calls [`Animator::compute_frame`] once per render with the current
//! progress and receives every visual parameter for that frame.  Nothing is
//! cached between calls; each frame is recomputed from scratch.

use serde::Serialize;

use super::background::{BackgroundModel, BackgroundParams};
use super::error::ConfigError;
use super::header::{scroll_to_section, HeaderModel, HeaderParams, ScrollRequest};
use super::progress::{Progress, ScrollRegion};
use super::section::{section_at, section_params, VisualParams};

/// All visual parameters for one progress value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub progress: Progress,
    /// Section whose window contains `progress`.
    pub current: usize,
    pub sections: Vec<VisualParams>,
    pub background: BackgroundParams,
    pub header: HeaderParams,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Animator {
    total: usize,
    margin: f64,
    header: HeaderModel,
    background: BackgroundModel,
}

impl Animator {
    pub fn new(
        total: usize,
        margin: f64,
        header: HeaderModel,
        background: BackgroundModel,
    ) -> Result<Self, ConfigError> {
        if total == 0 {
            return Err(ConfigError::NoSections);
        }
        if !(0.0..=0.5).contains(&margin) {
            return Err(ConfigError::Margin(margin));
        }
        Ok(Self {
            total,
            margin,
            header,
            background,
        })
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn compute_frame(&self, progress: Progress) -> Frame {
        Frame {
            progress,
            current: section_at(self.total, progress),
            sections: (0..self.total)
                .map(|i| section_params(i, self.total, self.margin, progress))
                .collect(),
            background: self.background.params(progress),
            header: self.header.params(progress),
        }
    }

    pub fn scroll_to_section(&self, index: usize, region: &ScrollRegion) -> ScrollRequest {
        scroll_to_section(index, self.total, region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::background::default_stops;
    use crate::core::header::{default_text_stops, HeaderTextColor, DEFAULT_EPSILON};
    use crate::core::section::DEFAULT_MARGIN;

    fn animator(total: usize) -> Animator {
        Animator::new(
            total,
            DEFAULT_MARGIN,
            HeaderModel::new(
                DEFAULT_EPSILON,
                HeaderTextColor::interpolated(&default_text_stops()).unwrap(),
            )
            .unwrap(),
            BackgroundModel::new(&default_stops(), None).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn frame_has_one_entry_per_section() {
        let frame = animator(4).compute_frame(Progress::new(0.3));
        assert_eq!(frame.sections.len(), 4);
        assert_eq!(frame.current, 1);
    }

    #[test]
    fn at_most_one_section_is_interactive() {
        let a = animator(4);
        for i in 0..=200 {
            let frame = a.compute_frame(Progress::new(i as f64 / 200.0));
            let interactive = frame.sections.iter().filter(|s| s.interactive).count();
            assert!(interactive <= 1, "progress {}", frame.progress.get());
        }
    }

    #[test]
    fn frames_are_independent_of_call_order() {
        let a = animator(4);
        let first = a.compute_frame(Progress::new(0.61));
        let _ = a.compute_frame(Progress::new(0.05));
        let _ = a.compute_frame(Progress::new(0.99));
        assert_eq!(a.compute_frame(Progress::new(0.61)), first);
    }

    #[test]
    fn end_of_scroll_shows_only_the_terminal_section() {
        let frame = animator(4).compute_frame(Progress::END);
        let visible: Vec<_> = frame.sections.iter().map(|s| s.is_visible()).collect();
        assert_eq!(visible, [false, false, false, true]);
        assert_eq!(frame.header.opacity, 0.0);
    }

    #[test]
    fn serializes_to_json() {
        let frame = animator(2).compute_frame(Progress::new(0.5));
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["progress"], 0.5);
        assert_eq!(json["sections"].as_array().unwrap().len(), 2);
        assert!(json["background"]["color"].as_str().unwrap().starts_with('#'));
        assert_eq!(json["sections"][0]["offset"]["unit"], "px");
    }

    #[test]
    fn rejects_empty_page_and_bad_margin() {
        let header = HeaderModel::new(DEFAULT_EPSILON, HeaderTextColor::Fixed(crate::core::color::Rgb::WHITE)).unwrap();
        let bg = BackgroundModel::new(&default_stops(), None).unwrap();
        assert!(matches!(
            Animator::new(0, 0.1, header.clone(), bg.clone()),
            Err(ConfigError::NoSections)
        ));
        assert!(matches!(Animator::new(3, -0.1, header, bg), Err(ConfigError::Margin(_))));
    }
}
