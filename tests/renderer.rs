mod tests {
    use embassy_time::{Duration, Instant};
    use lightbars::color::{gamma_correct, gradient, hsv_to_rgb, hues, scale_rgb};
    use lightbars::frame_scheduler::DEFAULT_FRAME_DURATION;
    use lightbars::pattern::PatternSlot;
    use lightbars::{
        ColorId, ControlIntent, ControlState, FrameBuffer, FrameScheduler, IntentChannel,
        OutputDriver, PatternConfig, PatternId, PixelDriver, Renderer, RendererConfig, Rgb,
        Topology,
    };
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const SEGMENTS: usize = 3;
    const LEDS_PER_SEGMENT: usize = 4;
    const LED_COUNT: usize = SEGMENTS * LEDS_PER_SEGMENT;

    /// Pixel driver recording every call
    #[derive(Default)]
    struct RecordingDriver {
        pixels: Vec<(usize, Rgb, u8)>,
        clears: usize,
        presents: usize,
    }

    impl PixelDriver for RecordingDriver {
        fn set_pixel(&mut self, index: usize, color: Rgb, brightness: u8) {
            self.pixels.push((index, color, brightness));
        }

        fn clear(&mut self) {
            self.clears += 1;
            self.pixels.clear();
        }

        fn present(&mut self) {
            self.presents += 1;
        }
    }

    /// Output driver keeping the last written frame
    #[derive(Default)]
    struct CapturedOutput {
        frame: Vec<Rgb>,
        writes: usize,
    }

    impl OutputDriver for CapturedOutput {
        fn write(&mut self, colors: &[Rgb]) {
            self.frame = colors.to_vec();
            self.writes += 1;
        }
    }

    fn config(pattern: PatternId, color: ColorId) -> RendererConfig<SEGMENTS, LEDS_PER_SEGMENT> {
        let mut control = ControlState {
            brightness: 255,
            ..ControlState::default()
        };
        control.set_pattern(pattern);
        control.set_color(color);
        RendererConfig {
            topology: Topology::serpentine(),
            control,
            patterns: PatternConfig::default(),
        }
    }

    fn expected_color(hue: u16, brightness: u8) -> Rgb {
        gamma_correct(scale_rgb(hsv_to_rgb(hue), brightness))
    }

    fn at(millis: u64) -> Instant {
        Instant::from_millis(millis)
    }

    #[test]
    fn test_fill_lights_every_pixel() {
        let channel = IntentChannel::<4>::new();
        let output = FrameBuffer::<_, LED_COUNT>::new(CapturedOutput::default());
        let mut renderer = Renderer::new(
            output,
            SmallRng::seed_from_u64(1),
            channel.receiver(),
            &config(PatternId::Fill, ColorId::Red),
        );

        renderer.render(at(0));

        let output = renderer.driver().output();
        assert_eq!(output.writes, 1);
        let expected = scale_rgb(expected_color(hues::RED, 125), 255);
        assert_eq!(output.frame, vec![expected; LED_COUNT]);
    }

    #[test]
    fn test_global_brightness_scales_output() {
        let channel = IntentChannel::<4>::new();
        let mut config = config(PatternId::Fill, ColorId::Green);
        config.control.brightness = 100;
        let mut renderer = Renderer::new(
            RecordingDriver::default(),
            SmallRng::seed_from_u64(2),
            channel.receiver(),
            &config,
        );

        renderer.render(at(0));
        let expected = expected_color(hues::GREEN, 125);
        assert_eq!(renderer.driver().pixels.len(), LED_COUNT);
        for &(_, color, brightness) in &renderer.driver().pixels {
            assert_eq!(color, expected);
            assert_eq!(brightness, 100);
        }
    }

    #[test]
    fn test_hue_offset_rotates_colors() {
        let channel = IntentChannel::<4>::new();
        let mut config = config(PatternId::Fill, ColorId::Red);
        config.control.hue_offset = 85;
        let mut renderer = Renderer::new(
            RecordingDriver::default(),
            SmallRng::seed_from_u64(3),
            channel.receiver(),
            &config,
        );

        renderer.render(at(0));
        let expected = expected_color(85 * 256, 125);
        assert!(renderer.driver().pixels.iter().all(|&(_, color, _)| color == expected));
    }

    #[test]
    fn test_gradient_follows_wiring() {
        let channel = IntentChannel::<4>::new();
        let mut renderer = Renderer::new(
            RecordingDriver::default(),
            SmallRng::seed_from_u64(4),
            channel.receiver(),
            &config(PatternId::Fill, ColorId::RedToYellow),
        );
        renderer.render(at(0));

        let color_at = |index: usize| {
            renderer
                .driver()
                .pixels
                .iter()
                .find(|&&(i, _, _)| i == index)
                .map(|&(_, color, _)| color)
        };
        let top = expected_color(hues::RED, 125);
        let bottom = expected_color(hues::YELLOW, 125);
        let second = expected_color(gradient(1, &[hues::RED, hues::YELLOW], 4), 125);

        // Segment 1 is wired bottom up
        assert_eq!(color_at(0), Some(top));
        assert_eq!(color_at(3), Some(bottom));
        assert_eq!(color_at(7), Some(top));
        assert_eq!(color_at(6), Some(second));
        assert_eq!(color_at(4), Some(bottom));
    }

    #[test]
    fn test_off_is_idempotent() {
        let channel = IntentChannel::<4>::new();
        let mut renderer = Renderer::new(
            RecordingDriver::default(),
            SmallRng::seed_from_u64(5),
            channel.receiver(),
            &config(PatternId::Glow, ColorId::Blue),
        );

        renderer.render(at(0));
        assert!(!renderer.is_off());
        renderer.off();
        renderer.off();
        assert!(renderer.is_off());
        assert_eq!(renderer.driver().presents, 2);
        assert!(renderer.driver().pixels.is_empty());

        renderer.render(at(16));
        assert!(!renderer.is_off());
        assert_eq!(renderer.driver().presents, 3);
    }

    #[test]
    fn test_intents_are_applied_before_rendering() {
        let channel = IntentChannel::<8>::new();
        let sender = channel.sender();
        let mut renderer = Renderer::new(
            RecordingDriver::default(),
            SmallRng::seed_from_u64(6),
            channel.receiver(),
            &config(PatternId::Fill, ColorId::Red),
        );

        sender.try_send(ControlIntent::NextPattern).unwrap();
        sender.try_send(ControlIntent::PreviousColor).unwrap();
        sender.try_send(ControlIntent::IncreaseBrightness).unwrap();
        renderer.render(at(0));

        assert_eq!(renderer.pattern(), PatternId::Glow);
        assert_eq!(renderer.control().color(), ColorId::RainbowShift);
        assert_eq!(renderer.control().brightness, 255);
        assert_eq!(channel.len(), 0);
    }

    #[test]
    fn test_power_intents() {
        let channel = IntentChannel::<4>::new();
        let sender = channel.sender();
        let mut renderer = Renderer::new(
            RecordingDriver::default(),
            SmallRng::seed_from_u64(7),
            channel.receiver(),
            &config(PatternId::Fill, ColorId::Red),
        );
        renderer.render(at(0));

        sender.try_send(ControlIntent::Power(false)).unwrap();
        renderer.render(at(16));
        renderer.render(at(32));
        assert!(renderer.is_off());
        assert!(!renderer.is_powered());
        assert_eq!(renderer.driver().presents, 2);

        sender.try_send(ControlIntent::Power(true)).unwrap();
        renderer.render(at(48));
        assert!(!renderer.is_off());
        assert_eq!(renderer.driver().pixels.len(), LED_COUNT);
    }

    #[test]
    fn test_switching_pattern_resets_entities() {
        let channel = IntentChannel::<4>::new();
        let mut renderer = Renderer::new(
            RecordingDriver::default(),
            SmallRng::seed_from_u64(8),
            channel.receiver(),
            &config(PatternId::Sparkles, ColorId::Red),
        );
        renderer.render(at(0));

        renderer.control_mut().set_pattern(PatternId::Fill);
        renderer.render(at(10));
        renderer.control_mut().set_pattern(PatternId::Sparkles);
        renderer.render(at(20));

        let PatternSlot::Sparkles(sparkles) = renderer.slot() else {
            panic!("sparkles expected");
        };
        assert!(sparkles.field.active_count() > 0);
        for segment in 0..SEGMENTS {
            for index in 0..sparkles.field.slot_count() {
                if let lightbars::entity::ParticleSlot::Active(particle) =
                    sparkles.field.slot(segment, index)
                {
                    assert_eq!(particle.start_time, at(20));
                }
            }
        }
    }

    #[test]
    fn test_every_pattern_stays_on_the_strip() {
        for pattern in PatternId::ALL {
            let channel = IntentChannel::<4>::new();
            let mut renderer = Renderer::new(
                RecordingDriver::default(),
                SmallRng::seed_from_u64(u64::from(pattern.index())),
                channel.receiver(),
                &config(pattern, ColorId::RainbowShift),
            );
            for frame in 0..300 {
                renderer.render(at(frame * 16));
                for &(index, _, _) in &renderer.driver().pixels {
                    assert!(index < LED_COUNT, "{} drew {index}", pattern.as_str());
                }
            }
            assert_eq!(renderer.pattern(), pattern);
        }
    }

    #[test]
    fn test_randomize_picks_registered_entries() {
        let channel = IntentChannel::<4>::new();
        let mut renderer = Renderer::new(
            RecordingDriver::default(),
            SmallRng::seed_from_u64(9),
            channel.receiver(),
            &config(PatternId::Fill, ColorId::Red),
        );
        for frame in 0..20 {
            renderer.randomize();
            renderer.render(at(frame * 16));
            assert_eq!(renderer.pattern(), renderer.control().pattern());
        }
    }

    #[test]
    fn test_frame_buffer_drops_out_of_range_pixels() {
        let mut frame = FrameBuffer::<_, 4>::new(CapturedOutput::default());
        frame.set_pixel(2, Rgb::new(200, 100, 0), 255);
        frame.set_pixel(9, Rgb::new(255, 255, 255), 255);
        frame.present();
        assert_eq!(frame.output().frame[2], Rgb::new(200, 100, 0));
        assert_eq!(frame.output().frame.len(), 4);

        frame.clear();
        frame.present();
        assert!(frame.output().frame.iter().all(|&pixel| pixel == Rgb::default()));
        assert_eq!(frame.into_output().writes, 2);
    }

    #[test]
    fn test_scheduler_paces_frames() {
        let channel = IntentChannel::<4>::new();
        let renderer = Renderer::new(
            RecordingDriver::default(),
            SmallRng::seed_from_u64(10),
            channel.receiver(),
            &config(PatternId::Fill, ColorId::Red),
        );
        let mut scheduler = FrameScheduler::new(renderer);

        let result = scheduler.tick(at(0));
        assert_eq!(result.next_deadline, at(0) + DEFAULT_FRAME_DURATION);
        assert_eq!(result.sleep_duration, DEFAULT_FRAME_DURATION);

        // Running late shortens the sleep
        let result = scheduler.tick(at(15));
        assert_eq!(result.next_deadline, at(0) + DEFAULT_FRAME_DURATION * 2);

        // A long stall skips the backlog
        let result = scheduler.tick(at(10_000));
        assert_eq!(result.next_deadline, at(10_000) + DEFAULT_FRAME_DURATION);
        assert_eq!(scheduler.renderer().driver().presents, 3);
        assert_eq!(scheduler.frame_duration(), Duration::from_millis(11));
    }
}
