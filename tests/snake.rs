mod tests {
    use embassy_time::Instant;
    use lightbars::entity::{
        MAX_SNAKE_LENGTH, MAX_SNAKES, MIN_SNAKE_LENGTH, Point, Snake, SnakeSimulation,
        StepOutcome, Tick,
    };
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn is_adjacent(a: Point, b: Point) -> bool {
        a.x.abs_diff(b.x) + a.y.abs_diff(b.y) == 1
    }

    fn assert_fresh(snake: &Snake) {
        let len = snake.points.len();
        assert!((MIN_SNAKE_LENGTH..=MAX_SNAKE_LENGTH).contains(&len));
        assert!(snake.points.iter().all(|&point| point == snake.head()));
        assert!((-3000..=3000).contains(&snake.hue_drift));
        let delay = snake.step_delay.as_millis();
        assert!((250..750).contains(&delay));
    }

    fn assert_disjoint<const W: usize, const H: usize>(simulation: &SnakeSimulation<W, H>) {
        for (index, snake) in simulation.snakes().iter().enumerate() {
            for &point in &snake.points {
                assert!(point.x < W && point.y < H, "{point:?} off the grid");
                assert!(
                    !simulation.is_occupied(point, Some(index)),
                    "{point:?} shared between snakes"
                );
            }
        }
    }

    #[test]
    fn test_populate_seeds_fresh_snakes() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut simulation = SnakeSimulation::<6, 12>::new(4);
        simulation.populate(&mut rng, Instant::from_millis(0));

        assert_eq!(simulation.snakes().len(), 4);
        for snake in simulation.snakes() {
            assert_fresh(snake);
        }
        assert_disjoint(&simulation);
    }

    #[test]
    fn test_snake_count_is_capped() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut simulation = SnakeSimulation::<10, 10>::new(100);
        simulation.populate(&mut rng, Instant::from_millis(0));
        assert_eq!(simulation.snakes().len(), MAX_SNAKES);
    }

    #[test]
    fn test_populate_stops_when_grid_is_full() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut simulation = SnakeSimulation::<1, 2>::new(4);
        simulation.populate(&mut rng, Instant::from_millis(0));
        assert_eq!(simulation.snakes().len(), 2);
        assert_disjoint(&simulation);
    }

    #[test]
    fn test_step_moves_or_replaces() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut simulation = SnakeSimulation::<5, 8>::new(4);
        simulation.populate(&mut rng, Instant::from_millis(0));

        for millis in 0..500 {
            let index = rng.gen_range(0..simulation.snakes().len());
            let before = simulation.snakes()[index].points.clone();

            let outcome = simulation.step(index, &mut rng, Instant::from_millis(millis));
            let after = &simulation.snakes()[index];
            match outcome {
                StepOutcome::Moved => {
                    assert_eq!(after.points.len(), before.len());
                    assert!(is_adjacent(after.head(), before[0]));
                    assert_eq!(after.points[1..], before[..before.len() - 1]);
                }
                StepOutcome::Respawned => assert_fresh(after),
                StepOutcome::Stuck => panic!("a 5x8 grid always has room"),
            }
            assert_disjoint(&simulation);
        }
    }

    #[test]
    fn test_boxed_in_snake_is_replaced() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut simulation = SnakeSimulation::<1, 1>::new(1);
        simulation.populate(&mut rng, Instant::from_millis(0));

        let outcome = simulation.step(0, &mut rng, Instant::from_millis(1000));
        assert_eq!(outcome, StepOutcome::Respawned);
        let snake = &simulation.snakes()[0];
        assert_fresh(snake);
        assert_eq!(snake.head(), Point::new(0, 0));
        assert_eq!(snake.start_time, Instant::from_millis(1000));
    }

    #[test]
    fn test_step_seeds_a_fresh_simulation() {
        let mut rng = SmallRng::seed_from_u64(8);
        let mut simulation = SnakeSimulation::<4, 8>::new(4);

        let outcome = simulation.step(0, &mut rng, Instant::from_millis(0));
        assert_ne!(outcome, StepOutcome::Stuck);
        assert_eq!(simulation.snakes().len(), 4);
        assert_disjoint(&simulation);
    }

    #[test]
    fn test_step_without_snake_is_stuck() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut empty = SnakeSimulation::<4, 8>::new(0);
        assert_eq!(
            empty.step(0, &mut rng, Instant::from_millis(0)),
            StepOutcome::Stuck
        );
        assert!(empty.snakes().is_empty());

        let mut simulation = SnakeSimulation::<4, 8>::new(2);
        assert_eq!(
            simulation.step(5, &mut rng, Instant::from_millis(0)),
            StepOutcome::Stuck
        );
        assert_eq!(simulation.snakes().len(), 2);
    }

    #[test]
    fn test_render_draws_every_snake_and_walks() {
        let mut rng = SmallRng::seed_from_u64(6);
        let mut simulation = SnakeSimulation::<6, 20>::new(3);

        let mut heads = Vec::new();
        for millis in (0..5_000).step_by(20) {
            let mut emissions = Vec::new();
            let mut tick = Tick::new(Instant::from_millis(millis), &mut rng);
            simulation.render(&mut tick, &mut |emission| emissions.push(emission));

            for emission in &emissions {
                assert!(emission.segment < 6);
                assert!(emission.offset < 20);
                assert!(emission.brightness <= 130);
            }
            if millis == 0 {
                heads = simulation.snakes().iter().map(Snake::head).collect();
            }
            assert_disjoint(&simulation);
        }

        assert_eq!(simulation.snakes().len(), 3);
        let moved = simulation
            .snakes()
            .iter()
            .zip(&heads)
            .any(|(snake, head)| snake.head() != *head);
        assert!(moved);
    }

    #[test]
    fn test_reset_clears_snakes() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut simulation = SnakeSimulation::<4, 4>::new(2);
        simulation.populate(&mut rng, Instant::from_millis(0));
        simulation.reset();
        assert!(simulation.snakes().is_empty());
    }
}
