#[cfg(test)]
mod view_test {
    use crate::identifier::core::{Phase, State};
    use crate::identifier::tests::fixture::{cat, model, photo, ALL_PHASES};
    use crate::identifier::view::{
        affordance, format_result_row, is_preview_visible, view, Affordance, Preview,
    };
    use crate::model_provider::interface::Classification;

    fn row(confidence: f32) -> String {
        format_result_row(&Classification {
            label: "x".to_string(),
            confidence,
        })
    }

    #[test]
    fn test_affordance_per_phase() {
        let expected = [
            (Phase::Idle, Affordance::LoadModel),
            (Phase::ModelLoading, Affordance::Busy("Loading...")),
            (Phase::LoadFailed, Affordance::Retry),
            (Phase::ModelReady, Affordance::PickImage),
            (Phase::ImageStaged, Affordance::Identify),
            (Phase::Classifying, Affordance::Busy("Identifying...")),
            (Phase::ClassifyFailed, Affordance::Retry),
            (Phase::Complete, Affordance::Reset),
        ];

        assert_eq!(expected.len(), ALL_PHASES.len());
        for (phase, control) in expected {
            assert_eq!(affordance(phase), control, "{:?}", phase);
        }
    }

    #[test]
    fn test_busy_phases_accept_no_input() {
        for phase in ALL_PHASES {
            let busy = matches!(phase, Phase::ModelLoading | Phase::Classifying);
            assert_eq!(affordance(phase).accepts_input(), !busy, "{:?}", phase);
        }
    }

    #[test]
    fn test_preview_visibility() {
        for phase in ALL_PHASES {
            let visible = matches!(phase, Phase::ImageStaged | Phase::Complete);
            assert_eq!(is_preview_visible(phase), visible, "{:?}", phase);
        }
    }

    #[test]
    fn test_result_row_formatting() {
        assert_eq!(row(0.9567), "x: %95.67");
        assert_eq!(row(1.0), "x: %100.00");
        assert_eq!(row(0.0), "x: %0.00");
        assert_eq!(
            format_result_row(&Classification {
                label: "cat".to_string(),
                confidence: 0.83,
            }),
            "cat: %83.00"
        );
    }

    #[test]
    fn test_idle_view() {
        let state = State::Idle;
        let screen = view(&state);

        assert_eq!(screen.affordance, Affordance::LoadModel);
        assert_eq!(screen.preview, None);
        assert!(!screen.is_results_visible());
        assert_eq!(screen.error, None);
        assert_eq!(screen.model_name, None);
    }

    #[test]
    fn test_staged_view_shows_preview_without_results() {
        let image = photo("dog.jpg");
        let state = State::ImageStaged {
            model: model(vec![]),
            image: Some(image.clone()),
        };
        let screen = view(&state);

        assert_eq!(screen.preview, Some(Preview::Image(&image)));
        assert!(!screen.is_results_visible());
        assert_eq!(screen.model_name, Some("scripted"));
    }

    #[test]
    fn test_staged_view_without_image_shows_empty_preview() {
        let state = State::ImageStaged {
            model: model(vec![]),
            image: None,
        };

        assert_eq!(view(&state).preview, Some(Preview::Empty));
    }

    #[test]
    fn test_classifying_view_hides_preview() {
        let state = State::Classifying {
            model: model(vec![]),
            image: photo("dog.jpg"),
        };
        let screen = view(&state);

        assert_eq!(screen.preview, None);
        assert_eq!(screen.affordance, Affordance::Busy("Identifying..."));
    }

    #[test]
    fn test_complete_view_lists_results() {
        let image = photo("cat.jpg");
        let state = State::Complete {
            model: model(vec![]),
            image: image.clone(),
            results: cat(),
        };
        let screen = view(&state);

        assert!(screen.is_results_visible());
        assert_eq!(screen.results, vec!["cat: %83.00".to_string()]);
        assert_eq!(screen.preview, Some(Preview::Image(&image)));
        assert_eq!(screen.affordance, Affordance::Reset);
    }

    #[test]
    fn test_complete_with_no_labels_hides_results() {
        let state = State::Complete {
            model: model(vec![]),
            image: photo("blank.png"),
            results: vec![],
        };

        assert!(!view(&state).is_results_visible());
    }

    #[test]
    fn test_failed_view_shows_error() {
        let state = State::LoadFailed {
            message: "offline".to_string(),
        };
        let screen = view(&state);

        assert_eq!(screen.error, Some("offline"));
        assert_eq!(screen.affordance, Affordance::Retry);
        assert_eq!(screen.preview, None);
    }
}
