use crate::boids::{draw_flutter, survey, update, Boid, Survey};
use crate::config::FlockConfig;
use crate::validate::{validate_config, InvalidFlockConfig};
use crate::vector::Vector3D;
use log::{debug, info, trace};
use rand::rngs::StdRng;

/// Owns every boid and advances them one tick at a time.
///
/// A tick runs in two phases. First every boid surveys `boids`, which is not written
/// until all surveys are done. Then every boid's next state is written into `next`,
/// and the two buffers are swapped.
#[derive(Debug)]
pub(crate) struct Flock {
    config: FlockConfig,
    boids: Vec<Boid>,
    next: Vec<Boid>,
    surveys: Vec<Survey>,
    flutters: Vec<f32>,
    rng: StdRng,
    tick_count: u64,
}

impl Flock {
    /// the pattern of validate_config()?, then generate_boids() is used to avoid
    /// drawing any boids if the config is invalid
    pub(crate) fn spawn(config: FlockConfig, rng: StdRng) -> Result<Flock, InvalidFlockConfig> {
        validate_config(&config)?;
        let mut flock = Flock::empty(config, rng);
        flock.generate_boids();
        info!(
            "spawned {} boids in a {}x{}x{} domain",
            flock.len(),
            flock.config.width,
            flock.config.height,
            flock.config.depth
        );
        Ok(flock)
    }

    /// Builds a flock around hand-placed boids, mostly useful for pinning down a scenario.
    #[cfg(test)]
    pub(crate) fn with_boids(
        config: FlockConfig,
        boids: Vec<Boid>,
        rng: StdRng,
    ) -> Result<Flock, InvalidFlockConfig> {
        validate_config(&config)?;
        let mut flock = Flock::empty(config, rng);
        flock.set_boids(boids);
        Ok(flock)
    }

    fn empty(config: FlockConfig, rng: StdRng) -> Flock {
        Flock {
            config,
            boids: Vec::new(),
            next: Vec::new(),
            surveys: Vec::new(),
            flutters: Vec::new(),
            rng,
            tick_count: 0,
        }
    }

    fn generate_boids(&mut self) {
        let boids = (0..self.config.flock_size)
            .map(|_| Boid::random(&self.config, &mut self.rng))
            .collect();
        self.set_boids(boids);
    }

    fn set_boids(&mut self, boids: Vec<Boid>) {
        let n = boids.len();
        self.boids = boids;
        self.next = self.boids.clone();
        self.surveys = vec![Survey::default(); n];
        self.flutters = vec![0.0; n];
        self.tick_count = 0;
    }

    /// Throws the current boids away and draws a fresh flock from the same generator
    pub(crate) fn respawn(&mut self) {
        self.generate_boids();
        debug!("respawned {} boids", self.len());
    }

    pub(crate) fn tick(&mut self) {
        self.advance(0..self.boids.len());
    }

    /// Same as `tick`, but both phases visit the boids in `order`, which must be a
    /// permutation of the flock's indices.
    #[cfg(test)]
    pub(crate) fn tick_with_order(&mut self, order: &[usize]) {
        debug_assert_eq!(order.len(), self.boids.len());
        self.advance(order.iter().copied());
    }

    fn advance<I>(&mut self, order: I)
    where
        I: Iterator<Item = usize> + Clone,
    {
        for idx in order.clone() {
            self.surveys[idx] = survey(idx, &self.boids, &self.config);
        }

        // drawn in flock order whatever the visiting order, so a seed replays the same run
        for flutter in self.flutters.iter_mut() {
            *flutter = draw_flutter(&self.config, &mut self.rng);
        }

        for idx in order {
            self.next[idx] = update(
                &self.boids[idx],
                &self.surveys[idx],
                &self.config,
                self.flutters[idx],
            );
        }

        std::mem::swap(&mut self.boids, &mut self.next);
        self.tick_count += 1;

        trace!(
            "tick {}: {} of {} boids had no visible neighbors",
            self.tick_count,
            self.surveys.iter().filter(|s| s.neighbor_count == 0).count(),
            self.boids.len()
        );
    }

    pub(crate) fn len(&self) -> usize {
        self.boids.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    /// Read-only view of the flock as of the last completed tick
    pub(crate) fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub(crate) fn positions(&self) -> impl Iterator<Item = Vector3D> + '_ {
        self.boids().iter().map(|boid| boid.position)
    }

    pub(crate) fn position(&self, idx: usize) -> Vector3D {
        self.boids[idx].position
    }

    pub(crate) fn depth(&self, idx: usize) -> f32 {
        self.position(idx).z
    }

    pub(crate) fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub(crate) fn config(&self) -> &FlockConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn quiet_config() -> FlockConfig {
        FlockConfig {
            width: 1000.0,
            height: 800.0,
            depth: 400.0,
            min_speed: 0.0,
            max_speed: 1000.0,
            min_flutter: 0.0,
            max_flutter: 0.0,
            ..FlockConfig::default()
        }
    }

    fn assert_inside_domain(flock: &Flock) {
        let config = flock.config();
        for idx in 0..flock.len() {
            let p = flock.position(idx);
            assert!(p.x >= 0.0 && p.x <= config.width, "x out of bounds: {:?}", p);
            assert!(p.y >= 0.0 && p.y <= config.height, "y out of bounds: {:?}", p);
            assert!(p.z >= 0.0 && p.z <= config.depth, "z out of bounds: {:?}", p);
        }
    }

    #[test]
    fn test_spawn_inside_domain_and_speed_bounds() {
        let config = FlockConfig::default();
        let flock = Flock::spawn(config.clone(), StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(flock.len(), config.flock_size);
        assert_eq!(flock.tick_count(), 0);

        for boid in &flock.boids {
            assert!(boid.position.x < config.width);
            assert!(boid.position.y < config.height);
            assert!(boid.position.z < config.depth);
            let speed = boid.velocity.horizontal_length();
            assert!(speed >= config.min_speed - 1e-3 && speed <= config.max_speed + 1e-3);
        }
        assert_inside_domain(&flock);
    }

    #[test]
    fn test_spawn_refuses_invalid_config() {
        let config = FlockConfig {
            min_speed: 20.0,
            max_speed: 10.0,
            ..FlockConfig::default()
        };
        let result = Flock::spawn(config, StdRng::seed_from_u64(0));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().errors.len(), 1);
    }

    #[test]
    fn test_spawn_refuses_non_finite_config() {
        let config = FlockConfig {
            min_speed: f32::NAN,
            ..FlockConfig::default()
        };
        assert!(Flock::spawn(config, StdRng::seed_from_u64(0)).is_err());

        let config = FlockConfig {
            width: f32::INFINITY,
            ..FlockConfig::default()
        };
        assert!(Flock::spawn(config, StdRng::seed_from_u64(0)).is_err());
    }

    #[test]
    fn test_read_accessors_agree() {
        let mut flock =
            Flock::spawn(FlockConfig::default(), StdRng::seed_from_u64(8)).unwrap();
        flock.tick();

        let positions: Vec<Vector3D> = flock.positions().collect();
        assert_eq!(positions.len(), flock.len());
        assert_eq!(flock.boids().len(), flock.len());
        for (idx, position) in positions.iter().enumerate() {
            assert_eq!(*position, flock.boids()[idx].position);
            assert_eq!(*position, flock.position(idx));
            assert_eq!(position.z, flock.depth(idx));
        }
    }

    #[test]
    fn test_boids_stay_inside_domain() {
        let mut flock =
            Flock::spawn(FlockConfig::default(), StdRng::seed_from_u64(5)).unwrap();
        for _ in 0..300 {
            flock.tick();
            assert_inside_domain(&flock);
        }
        assert_eq!(flock.tick_count(), 300);
    }

    #[test]
    fn test_same_seed_same_flock() {
        let mut first = Flock::spawn(FlockConfig::default(), StdRng::seed_from_u64(9)).unwrap();
        let mut second = Flock::spawn(FlockConfig::default(), StdRng::seed_from_u64(9)).unwrap();
        for _ in 0..20 {
            first.tick();
            second.tick();
        }
        assert_eq!(first.boids, second.boids);
    }

    #[test]
    fn test_lone_boid_only_feels_edges_and_flutter() {
        let config = FlockConfig {
            flock_size: 1,
            ..FlockConfig::default()
        };
        let boid = Boid::new(
            Vector3D::new(config.width / 2.0, config.height / 2.0, config.depth / 2.0),
            Vector3D::new(9.0, 9.0, 0.0),
        );
        let mut flock =
            Flock::with_boids(config.clone(), vec![boid], StdRng::seed_from_u64(1)).unwrap();
        flock.tick();

        let velocity = flock.boids[0].velocity;
        // far from every edge and already within the speed bounds
        assert_eq!(velocity.x, 9.0);
        assert_eq!(velocity.y, 9.0);
        assert!(velocity.z.abs() <= config.max_flutter);
        assert_eq!(flock.surveys[0].neighbor_count, 0);
    }

    #[test]
    fn test_close_pair_pushes_apart() {
        let config = FlockConfig {
            matching_factor: 0.0,
            centering_factor: 0.0,
            ..quiet_config()
        };
        let gap = config.protected_range - 1.0;
        let centre = Vector3D::new(config.width / 2.0, config.height / 2.0, config.depth / 2.0);
        let boids = vec![
            Boid::new(centre, Vector3D::zero()),
            Boid::new(centre + Vector3D::new(gap, 0.0, 0.0), Vector3D::zero()),
        ];
        let mut flock = Flock::with_boids(config.clone(), boids, StdRng::seed_from_u64(1)).unwrap();
        flock.tick();

        let left = flock.boids[0].velocity;
        let right = flock.boids[1].velocity;
        assert!(left.x < 0.0);
        assert!(right.x > 0.0);
        assert_eq!(left.x, -config.avoid_factor * gap);
        assert_eq!(right.x, config.avoid_factor * gap);
    }

    #[test]
    fn test_close_pair_still_opposite_after_speed_clamp() {
        let config = FlockConfig {
            max_flutter: 0.0,
            ..FlockConfig::default()
        };
        let gap = config.protected_range - 1.0;
        let centre = Vector3D::new(config.width / 2.0, config.height / 2.0, config.depth / 2.0);
        let boids = vec![
            Boid::new(centre, Vector3D::zero()),
            Boid::new(centre + Vector3D::new(gap, 0.0, 0.0), Vector3D::zero()),
        ];
        let mut flock = Flock::with_boids(config, boids, StdRng::seed_from_u64(1)).unwrap();
        flock.tick();

        assert!(flock.boids[0].velocity.x < 0.0);
        assert!(flock.boids[1].velocity.x > 0.0);
    }

    #[test]
    fn test_left_edge_scenario_through_tick() {
        let config = quiet_config();
        let boid = Boid::new(
            Vector3D::new(config.margin - 1.0, config.height / 2.0, config.depth / 2.0),
            Vector3D::zero(),
        );
        let mut flock = Flock::with_boids(config.clone(), vec![boid], StdRng::seed_from_u64(1)).unwrap();
        flock.tick();
        assert_eq!(flock.boids[0].velocity.x, config.turn_factor);
    }

    #[test]
    fn test_tick_does_not_depend_on_visiting_order() {
        let config = FlockConfig {
            flock_size: 40,
            // crowded enough that most boids see each other
            width: 300.0,
            height: 300.0,
            depth: 255.0,
            ..FlockConfig::default()
        };
        let forward = Flock::spawn(config.clone(), StdRng::seed_from_u64(21)).unwrap();
        let mut in_order = Flock::with_boids(
            config.clone(),
            forward.boids.clone(),
            StdRng::seed_from_u64(4),
        )
        .unwrap();
        let mut reversed =
            Flock::with_boids(config.clone(), forward.boids.clone(), StdRng::seed_from_u64(4))
                .unwrap();
        let mut shuffled =
            Flock::with_boids(config, forward.boids.clone(), StdRng::seed_from_u64(4)).unwrap();

        let n = in_order.len();
        let backwards: Vec<usize> = (0..n).rev().collect();
        // evens then odds
        let interleaved: Vec<usize> = (0..n).step_by(2).chain((1..n).step_by(2)).collect();

        for _ in 0..5 {
            in_order.tick();
            reversed.tick_with_order(&backwards);
            shuffled.tick_with_order(&interleaved);
        }

        assert!(in_order.surveys.iter().any(|s| s.neighbor_count > 0));
        assert_eq!(in_order.boids, reversed.boids);
        assert_eq!(in_order.boids, shuffled.boids);
    }

    #[test]
    fn test_respawn_keeps_size_and_resets_ticks() {
        let mut flock =
            Flock::spawn(FlockConfig::default(), StdRng::seed_from_u64(2)).unwrap();
        let before = flock.boids.clone();
        flock.tick();
        flock.respawn();

        assert_eq!(flock.len(), before.len());
        assert_eq!(flock.tick_count(), 0);
        assert_ne!(flock.boids, before);
        assert_inside_domain(&flock);
    }

    #[test]
    fn test_empty_flock_ticks() {
        let config = FlockConfig {
            flock_size: 0,
            ..FlockConfig::default()
        };
        let mut flock = Flock::spawn(config, StdRng::seed_from_u64(0)).unwrap();
        assert!(flock.is_empty());
        flock.tick();
        assert_eq!(flock.tick_count(), 1);
    }
}
