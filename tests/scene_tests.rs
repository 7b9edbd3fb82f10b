use catsim::simulation::cat::{CatParticle, CatState};
use catsim::simulation::collision::{
    BruteForceCollisionDetection, CollisionDetection, KdTreeCollisionDetection,
};
use catsim::simulation::config::{ConfigError, SceneConfig};
use catsim::simulation::emitter::{CatEmitter, CatGenerator};
use catsim::simulation::geometry::{Offset2D, Point2D};
use catsim::simulation::movement::MoveGenerator;
use catsim::simulation::scene::CatScene;

fn brute() -> Box<dyn CollisionDetection> {
    Box::new(BruteForceCollisionDetection)
}

#[test]
fn state_for_distance_honors_both_thresholds() {
    let config = SceneConfig {
        fight_dist: 1.0,
        hiss_dist: 2.0,
        ..SceneConfig::default()
    };
    assert_eq!(config.state_for_distance(0.5), CatState::Fight);
    assert_eq!(config.state_for_distance(1.0), CatState::Fight);
    assert_eq!(config.state_for_distance(1.5), CatState::Hiss);
    assert_eq!(config.state_for_distance(2.0), CatState::Hiss);
    assert_eq!(config.state_for_distance(3.0), CatState::Calm);
}

#[test]
fn calc_new_state_matches_config_thresholds() {
    let config = SceneConfig {
        fight_dist: 1.0,
        hiss_dist: 2.0,
        particle_count: 0,
        ..SceneConfig::default()
    };
    let scene = CatScene::new(config, brute()).expect("scene");
    assert_eq!(scene.calc_new_state(0.5), CatState::Fight);
    assert_eq!(scene.calc_new_state(1.5), CatState::Hiss);
    assert_eq!(scene.calc_new_state(3.0), CatState::Calm);
}

#[test]
fn fight_overrides_simultaneous_hiss() {
    // Cat 1 is within fight range of cat 0 and only hiss range of cat 2.
    let cats = vec![
        CatParticle::new(0, Point2D::new(0.0, 0.0)),
        CatParticle::new(1, Point2D::new(1.0, 0.0)),
        CatParticle::new(2, Point2D::new(3.5, 0.0)),
    ];
    let config = SceneConfig {
        fight_dist: 1.5,
        hiss_dist: 4.0,
        move_step: 0.0,
        spawn_per_tick: 0,
        ..SceneConfig::default()
    };
    let mut scene = CatScene::from_particles(cats, config, brute()).expect("scene");
    scene.tick().expect("tick");

    assert_eq!(scene.cats()[0].state, CatState::Fight);
    assert_eq!(scene.cats()[1].state, CatState::Fight);
    assert_eq!(scene.cats()[2].state, CatState::Hiss);
}

#[test]
fn isolated_cat_returns_to_calm() {
    let mut lonely = CatParticle::new(0, Point2D::new(50.0, 50.0));
    lonely.state = CatState::Fight;

    let config = SceneConfig {
        fight_dist: 1.0,
        hiss_dist: 2.0,
        move_step: 0.0,
        spawn_per_tick: 0,
        ..SceneConfig::default()
    };
    let mut scene = CatScene::from_particles(vec![lonely], config, brute()).expect("scene");
    scene.tick().expect("tick");

    assert_eq!(scene.cats()[0].state, CatState::Calm);
}

#[test]
fn tick_moves_cats_and_keeps_them_in_bounds() {
    let config = SceneConfig {
        particle_count: 50,
        grid_width: 20.0,
        grid_height: 20.0,
        move_step: 5.0,
        spawn_per_tick: 0,
        ..SceneConfig::default()
    };
    let mut scene = CatScene::with_seed(config, brute(), 42).expect("scene");
    let before: Vec<Point2D> = scene.cats().iter().map(|c| c.pos).collect();

    for _ in 0..10 {
        scene.tick().expect("tick");
    }

    let after: Vec<Point2D> = scene.cats().iter().map(|c| c.pos).collect();
    assert_ne!(before, after);
    for cat in scene.cats() {
        assert!(cat.pos.x >= 0.0 && cat.pos.x <= 20.0);
        assert!(cat.pos.y >= 0.0 && cat.pos.y <= 20.0);
    }
}

#[test]
fn identities_survive_ticks() {
    let config = SceneConfig {
        particle_count: 20,
        spawn_per_tick: 0,
        ..SceneConfig::default()
    };
    let mut scene = CatScene::with_seed(config, brute(), 8).expect("scene");
    let ids: Vec<usize> = scene.cats().iter().map(|c| c.id).collect();

    for _ in 0..5 {
        scene.tick().expect("tick");
    }

    let after: Vec<usize> = scene.cats().iter().map(|c| c.id).collect();
    assert_eq!(ids, after);
}

#[test]
fn tick_reports_collisions_and_spawns() {
    let cats = vec![
        CatParticle::new(0, Point2D::new(0.0, 0.0)),
        CatParticle::new(1, Point2D::new(1.0, 0.0)),
    ];
    let config = SceneConfig {
        fight_dist: 1.0,
        hiss_dist: 2.0,
        move_step: 0.0,
        spawn_per_tick: 3,
        ..SceneConfig::default()
    };
    let mut scene = CatScene::from_particles(cats, config, brute()).expect("scene");
    let report = scene.tick().expect("tick");

    assert_eq!(report.collisions, 1);
    assert_eq!(report.spawned, 3);
    assert_eq!(scene.cats().len(), 5);
}

#[test]
fn spawned_cats_get_fresh_ids() {
    let existing = vec![
        CatParticle::new(7, Point2D::new(1.0, 1.0)),
        CatParticle::new(3, Point2D::new(90.0, 90.0)),
    ];
    let config = SceneConfig {
        spawn_per_tick: 5,
        move_step: 0.0,
        ..SceneConfig::default()
    };
    let mut scene = CatScene::from_particles(existing, config, brute()).expect("scene");
    scene.tick().expect("tick");

    assert_eq!(scene.cats().len(), 7);
    let mut ids: Vec<usize> = scene.cats().iter().map(|c| c.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 7, "ids must stay unique");
    assert!(scene.cats().iter().skip(2).all(|c| c.id > 7));
}

#[test]
fn seeded_movement_is_reproducible() {
    let config = SceneConfig {
        move_step: 3.0,
        ..SceneConfig::default()
    };
    let mut a = MoveGenerator::with_seed(9);
    let mut b = MoveGenerator::with_seed(9);
    for _ in 0..100 {
        assert_eq!(a.next_offset(&config), b.next_offset(&config));
    }
}

#[test]
fn movement_respects_step_bound_and_bias() {
    let config = SceneConfig {
        move_step: 2.0,
        move_bias: Offset2D::new(1.0, -1.0),
        ..SceneConfig::default()
    };
    let mut mover = MoveGenerator::with_seed(5);
    for _ in 0..1000 {
        let off = mover.next_offset(&config);
        assert!(off.dx >= -1.0 && off.dx <= 3.0);
        assert!(off.dy >= -3.0 && off.dy <= 1.0);
    }
}

#[test]
fn emitter_produces_calm_unique_in_bounds_cats() {
    let config = SceneConfig {
        grid_width: 30.0,
        grid_height: 10.0,
        max_particles: 1000,
        ..SceneConfig::default()
    };
    let mut emitter = CatEmitter::new(CatGenerator::with_seed(1));
    let cats = emitter.emit(100, 0, &config);

    assert_eq!(cats.len(), 100);
    let mut ids: Vec<usize> = cats.iter().map(|c| c.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 100);
    for cat in &cats {
        assert_eq!(cat.state, CatState::Calm);
        assert!(cat.pos.x >= 0.0 && cat.pos.x <= 30.0);
        assert!(cat.pos.y >= 0.0 && cat.pos.y <= 10.0);
    }
}

#[test]
fn emitter_honors_population_cap() {
    let config = SceneConfig {
        max_particles: 10,
        ..SceneConfig::default()
    };
    let mut emitter = CatEmitter::new(CatGenerator::with_seed(2));
    assert_eq!(emitter.emit(100, 4, &config).len(), 6);
    assert_eq!(emitter.emit(100, 10, &config).len(), 0);
}

#[test]
fn config_rejects_nonsensical_geometry() {
    let base = SceneConfig::default();

    let zero_batch = SceneConfig {
        batch_size: 0,
        ..base.clone()
    };
    assert!(matches!(
        zero_batch.validate(),
        Err(ConfigError::NonPositiveBatchSize)
    ));

    let inverted = SceneConfig {
        fight_dist: 5.0,
        hiss_dist: 2.0,
        ..base.clone()
    };
    assert!(matches!(
        inverted.validate(),
        Err(ConfigError::ThresholdOrder { .. })
    ));

    let negative = SceneConfig {
        fight_dist: -1.0,
        ..base.clone()
    };
    assert!(matches!(
        negative.validate(),
        Err(ConfigError::NonPositiveThreshold { .. })
    ));

    let flat_world = SceneConfig {
        grid_height: 0.0,
        ..base.clone()
    };
    assert!(matches!(
        flat_world.validate(),
        Err(ConfigError::NonPositiveBounds { .. })
    ));

    assert!(base.validate().is_ok());
}

#[test]
fn scene_construction_rejects_invalid_config() {
    let config = SceneConfig {
        batch_size: 0,
        ..SceneConfig::default()
    };
    assert!(CatScene::new(config, brute()).is_err());
}

#[test]
fn update_config_validates_between_ticks() {
    let config = SceneConfig {
        particle_count: 3,
        ..SceneConfig::default()
    };
    let mut scene = CatScene::new(config, brute()).expect("scene");

    let bad = SceneConfig {
        fight_dist: 1.0,
        hiss_dist: 0.5,
        ..SceneConfig::default()
    };
    assert!(scene.update_config(bad).is_err());

    let tighter = SceneConfig {
        batch_size: 8,
        ..scene.config().clone()
    };
    scene.update_config(tighter).expect("valid config");
    assert_eq!(scene.config().batch_size, 8);
}

#[test]
fn scene_runs_with_the_kd_tree_strategy() {
    let config = SceneConfig {
        particle_count: 300,
        grid_width: 100.0,
        grid_height: 100.0,
        fight_dist: 2.0,
        hiss_dist: 6.0,
        spawn_per_tick: 2,
        ..SceneConfig::default()
    };
    let detector = Box::new(KdTreeCollisionDetection::new(4).expect("worker pool"));
    let mut scene = CatScene::with_seed(config, detector, 123).expect("scene");

    for _ in 0..20 {
        scene.tick().expect("tick");
    }
    assert_eq!(scene.cats().len(), 300 + 20 * 2);
}
