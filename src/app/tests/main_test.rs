#[cfg(test)]
mod main_test {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use crate::app::core::{DeviceOption, ModelStatus, Screen, UiEvent};
    use crate::app::render::Render;
    use crate::app::tests::fixture::Fixture;
    use crate::device_display::impl_fake::DeviceDisplayFake;
    use crate::image_classifier::impl_scripted::ranked;
    use crate::image_classifier::interface::ClassificationError;

    #[test]
    fn test_open_lists_video_inputs_with_fallback_labels() {
        let mut f = Fixture::new(vec![Ok(ranked("cup", 0.8))]);

        f.open();

        let view = f.app.view();
        assert_eq!(view.screen, Screen::Capture);
        assert_eq!(
            view.devices,
            vec![
                DeviceOption {
                    id: "cam1".to_string(),
                    label: "Front".to_string(),
                },
                DeviceOption {
                    id: "cam2".to_string(),
                    label: "Camera 2".to_string(),
                },
            ]
        );
        assert_eq!(view.selected.as_deref(), Some("cam1"));
    }

    #[test]
    fn test_start_is_disabled_until_model_loads() {
        let mut f = Fixture::new(vec![Ok(ranked("cup", 0.8))]);
        f.app.handle(UiEvent::OpenCapture);
        assert_eq!(f.app.view().model, ModelStatus::Loading);
        assert!(!f.app.view().can_start());

        f.app.handle(UiEvent::StartCapture);
        assert!(!f.app.view().capturing);
        assert!(f.runtime.streams().is_empty());

        f.app.load_model();
        f.scheduler.run_pending();
        f.app.pump();

        assert_eq!(f.app.view().model, ModelStatus::Ready);
        assert!(f.app.view().can_start());
    }

    #[test]
    fn test_model_load_failure_is_reported() {
        let mut f = Fixture::failing_load("missing weights");

        f.open();

        let view = f.app.view();
        assert!(matches!(view.model, ModelStatus::Failed(_)));
        assert!(!view.can_start());
        assert!(view
            .status
            .as_deref()
            .unwrap_or_default()
            .starts_with("Model load error"));
    }

    #[test]
    fn test_model_load_failure_outlives_screen_changes() {
        let mut f = Fixture::failing_load("missing weights");
        f.app.load_model();
        f.scheduler.run_pending();
        f.app.pump();

        f.app.handle(UiEvent::OpenCapture);
        f.app.pump();
        let expected = Some("Model load error: model failed to load: missing weights");
        assert_eq!(f.app.view().status.as_deref(), expected);

        f.app.handle(UiEvent::Back);
        assert_eq!(f.app.view().screen, Screen::Landing);
        assert_eq!(f.app.view().status.as_deref(), expected);

        f.app.handle(UiEvent::OpenCapture);
        f.app.pump();
        assert_eq!(f.app.view().status.as_deref(), expected);
    }

    #[test]
    fn test_start_publishes_label_every_interval() {
        let mut f = Fixture::new(vec![Ok(ranked("cup", 0.8)), Ok(ranked("mug", 0.6))]);
        f.open();

        f.app.handle(UiEvent::StartCapture);
        f.settle();

        assert!(f.app.view().capturing);
        assert!(f.app.video_ready());
        assert_eq!(f.app.view().label, "cup");
        assert_eq!(f.app.view().labels_published, 1);

        f.scheduler.advance(f.config.classify_interval);
        f.settle();

        assert_eq!(f.app.view().label, "mug");
        assert_eq!(f.app.view().labels_published, 2);
        assert_eq!(f.app.view().status, None);
    }

    #[test]
    fn test_classification_error_shows_status() {
        let mut f = Fixture::new(vec![Err(ClassificationError::Inference(
            "tensor shape mismatch".to_string(),
        ))]);
        f.open();

        f.app.handle(UiEvent::StartCapture);
        f.settle();

        assert_eq!(
            f.app.view().status.as_deref(),
            Some("Model classification error: inference failed: tensor shape mismatch")
        );
        assert_eq!(f.app.view().label, "");

        f.scheduler.advance(Duration::from_secs(10));
        assert_eq!(f.model.calls(), 1);
    }

    #[test]
    fn test_permission_denied_shows_status() {
        let mut f = Fixture::new(vec![Ok(ranked("cup", 0.8))]);
        f.open();
        f.runtime.set_permission_denied(true);

        f.app.handle(UiEvent::StartCapture);

        let view = f.app.view();
        assert!(!view.capturing);
        assert!(view
            .status
            .as_deref()
            .unwrap_or_default()
            .starts_with("Camera permission denied"));
        assert!(!f.logger.lines().is_empty());
    }

    #[test]
    fn test_video_not_ready_shows_status() {
        let mut f = Fixture::new(vec![Ok(ranked("cup", 0.8))]);
        f.open();
        f.runtime.set_warmup_polls(1_000);

        f.app.handle(UiEvent::StartCapture);
        f.scheduler.advance(Duration::from_secs(10));
        f.settle();

        assert_eq!(f.app.view().status.as_deref(), Some("Video not ready"));
        assert!(!f.app.video_ready());
        assert_eq!(f.model.calls(), 0);
    }

    #[test]
    fn test_selecting_device_while_capturing_switches_camera() {
        let mut f = Fixture::new(vec![Ok(ranked("cup", 0.8)), Ok(ranked("plate", 0.7))]);
        f.open();
        f.app.handle(UiEvent::StartCapture);
        f.settle();

        f.app.handle(UiEvent::SelectDevice("cam2".to_string()));
        f.settle();

        let streams = f.runtime.streams();
        assert_eq!(streams.len(), 2);
        assert!(streams[0].is_released());
        assert_eq!(streams[0].stop_calls(), 1);
        assert!(!streams[1].is_released());
        assert_eq!(f.app.view().selected_device_label(), Some("Camera 2"));

        f.scheduler.advance(f.config.classify_interval);
        f.settle();

        assert_eq!(f.app.view().label, "plate");
        assert!(streams[1].frames_grabbed() > 0);
    }

    #[test]
    fn test_back_tears_down_capture_and_loop() {
        let mut f = Fixture::new(vec![Ok(ranked("cup", 0.8))]);
        f.open();
        f.app.handle(UiEvent::StartCapture);
        f.settle();
        assert_eq!(f.model.calls(), 1);

        f.app.handle(UiEvent::Back);

        let view = f.app.view();
        assert_eq!(view.screen, Screen::Landing);
        assert!(!view.capturing);
        assert!(f.app.current_frame().is_none());
        assert!(f.runtime.streams()[0].is_released());

        f.scheduler.advance(Duration::from_secs(10));
        f.settle();
        assert_eq!(f.model.calls(), 1);
    }

    #[test]
    fn test_render_writes_capture_screen() {
        let mut f = Fixture::new(vec![Ok(ranked("cup", 0.8))]);
        f.open();
        f.app.handle(UiEvent::StartCapture);
        f.settle();

        let display = Arc::new(Mutex::new(DeviceDisplayFake::new(4, 40)));
        let render = Render::new(display.clone());
        render.render(f.app.view()).unwrap();

        let display = display.lock().unwrap();
        assert_eq!(
            display.lines(),
            &[
                "Camera: Front".to_string(),
                "Model: running".to_string(),
                "Label: cup".to_string(),
                String::new(),
            ]
        );
    }
}
