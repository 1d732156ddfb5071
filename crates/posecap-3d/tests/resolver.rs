use std::cell::Cell;

use glam::{Mat4, Vec2, Vec3};
use posecap_3d::{
    camera::{Camera, CameraIntrinsics},
    query::{FeatureFilter, FeatureHit, PlaneHit, SpatialQuery, SpatialQueryResult, SurfaceId},
    resolver::{FallbackResolver, ResolverConfig},
    ResolveError,
};

/// Scripted query source answering every hit test with canned results.
#[derive(Default)]
struct FakeQuery {
    camera: Option<Camera>,
    planes: Vec<PlaneHit>,
    high_quality: Vec<FeatureHit>,
    unfiltered: Vec<FeatureHit>,
    feature_queries: Cell<usize>,
}

impl SpatialQuery for FakeQuery {
    fn camera(&self) -> Option<Camera> {
        self.camera
    }

    fn hit_test_planes(&self, _screen_point: Vec2) -> Vec<PlaneHit> {
        self.planes.clone()
    }

    fn hit_test_features(
        &self,
        _screen_point: Vec2,
        filter: Option<FeatureFilter>,
    ) -> Vec<FeatureHit> {
        self.feature_queries.set(self.feature_queries.get() + 1);
        match filter {
            Some(_) => self.high_quality.clone(),
            None => self.unfiltered.clone(),
        }
    }
}

// camera one unit above the floor looking down -Z; the bottom half of the image sees the floor
fn camera() -> Camera {
    Camera::new(
        Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0)),
        CameraIntrinsics::new(500.0, 500.0, 320.0, 240.0),
    )
}

const FLOOR_PIXEL: Vec2 = Vec2::new(320.0, 480.0);

fn feature(position: Vec3) -> FeatureHit {
    FeatureHit {
        position,
        feature: position,
        distance_to_origin: 1.0,
        distance_to_ray: 0.0,
    }
}

fn plane(position: Vec3, id: u64) -> PlaneHit {
    PlaneHit {
        position,
        surface_id: SurfaceId(id),
        distance: 1.0,
    }
}

fn dragging_resolver() -> FallbackResolver {
    FallbackResolver::new(ResolverConfig {
        drag_on_infinite_planes: true,
        ..Default::default()
    })
}

#[test]
fn no_camera_is_unavailable() {
    let _ = env_logger::builder().is_test(true).try_init();
    let query = FakeQuery::default();
    let res = FallbackResolver::default().resolve(&query, FLOOR_PIXEL, None, false);
    assert_eq!(res, Err(ResolveError::QueryUnavailable));
}

#[test]
fn plane_hit_wins_over_everything() -> Result<(), ResolveError> {
    let query = FakeQuery {
        camera: Some(camera()),
        planes: vec![plane(Vec3::new(0.0, 0.0, -2.0), 4), plane(Vec3::ZERO, 5)],
        high_quality: vec![feature(Vec3::X)],
        unfiltered: vec![feature(Vec3::Y)],
        ..Default::default()
    };

    // the hint and flags would make the infinite plane eligible
    let result = dragging_resolver().resolve(&query, FLOOR_PIXEL, Some(Vec3::ZERO), true)?;

    assert_eq!(
        result,
        SpatialQueryResult::PlaneHit {
            position: Vec3::new(0.0, 0.0, -2.0),
            surface_id: SurfaceId(4),
        }
    );
    assert!(result.hit_known_surface());
    assert_eq!(query.feature_queries.get(), 0);
    Ok(())
}

#[test]
fn high_quality_feature_beats_infinite_plane_by_default() -> Result<(), ResolveError> {
    let query = FakeQuery {
        camera: Some(camera()),
        high_quality: vec![feature(Vec3::new(0.1, 0.2, -1.0)), feature(Vec3::X)],
        ..Default::default()
    };

    let result = FallbackResolver::default().resolve(&query, FLOOR_PIXEL, Some(Vec3::ZERO), true)?;

    assert_eq!(
        result.into_parts(),
        (Some(Vec3::new(0.1, 0.2, -1.0)), None, false)
    );
    Ok(())
}

#[test]
fn infinite_plane_when_requested_and_enabled() -> Result<(), ResolveError> {
    let query = FakeQuery {
        camera: Some(camera()),
        high_quality: vec![feature(Vec3::new(0.1, 0.2, -1.0))],
        ..Default::default()
    };

    let result = dragging_resolver().resolve(&query, FLOOR_PIXEL, Some(Vec3::ZERO), true)?;
    let (position, surface, known) = result.into_parts();
    let position = position.expect("infinite plane hit");
    assert!(position.y.abs() < 1e-5);
    assert_eq!(surface, None);
    assert!(known);

    // the caller did not ask for it
    let result = dragging_resolver().resolve(&query, FLOOR_PIXEL, Some(Vec3::ZERO), false)?;
    assert!(matches!(
        result,
        SpatialQueryResult::FeatureHit {
            high_quality: true,
            ..
        }
    ));
    Ok(())
}

#[test]
fn infinite_plane_when_no_good_feature() -> Result<(), ResolveError> {
    let query = FakeQuery {
        camera: Some(camera()),
        unfiltered: vec![feature(Vec3::Z)],
        ..Default::default()
    };

    let result = FallbackResolver::default().resolve(&query, FLOOR_PIXEL, Some(Vec3::ZERO), false)?;
    assert!(matches!(result, SpatialQueryResult::InfinitePlaneHit { .. }));
    assert!(result.hit_known_surface());
    assert_eq!(result.surface_id(), None);
    Ok(())
}

#[test]
fn missed_infinite_plane_falls_through_to_unfiltered() -> Result<(), ResolveError> {
    let query = FakeQuery {
        camera: Some(camera()),
        unfiltered: vec![feature(Vec3::Z), feature(Vec3::X)],
        ..Default::default()
    };

    // the plane through the hint is above the camera and the ray points down
    let hint = Vec3::new(0.0, 3.0, 0.0);
    let result = FallbackResolver::default().resolve(&query, FLOOR_PIXEL, Some(hint), false)?;
    assert_eq!(
        result,
        SpatialQueryResult::FeatureHit {
            position: Vec3::Z,
            high_quality: false,
        }
    );
    assert!(!result.hit_known_surface());
    Ok(())
}

#[test]
fn without_hint_unfiltered_is_last_resort() -> Result<(), ResolveError> {
    let query = FakeQuery {
        camera: Some(camera()),
        unfiltered: vec![feature(Vec3::X)],
        ..Default::default()
    };

    let result = dragging_resolver().resolve(&query, FLOOR_PIXEL, None, true)?;
    assert_eq!(result.into_parts(), (Some(Vec3::X), None, false));
    assert_eq!(query.feature_queries.get(), 2);
    Ok(())
}

#[test]
fn nothing_found() -> Result<(), ResolveError> {
    let query = FakeQuery {
        camera: Some(camera()),
        ..Default::default()
    };

    let result = FallbackResolver::default().resolve(&query, FLOOR_PIXEL, None, false)?;
    assert_eq!(result, SpatialQueryResult::NoHit);
    assert_eq!(result.into_parts(), (None, None, false));
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Outcome {
    Plane,
    GoodFeature,
    AnyFeature,
    InfinitePlane,
    Nothing,
}

fn outcome(result: &SpatialQueryResult) -> Outcome {
    match result {
        SpatialQueryResult::PlaneHit { .. } => Outcome::Plane,
        SpatialQueryResult::FeatureHit {
            high_quality: true, ..
        } => Outcome::GoodFeature,
        SpatialQueryResult::FeatureHit {
            high_quality: false,
            ..
        } => Outcome::AnyFeature,
        SpatialQueryResult::InfinitePlaneHit { .. } => Outcome::InfinitePlane,
        SpatialQueryResult::NoHit => Outcome::Nothing,
    }
}

#[test]
fn outcome_and_known_surface_per_scenario() -> Result<(), ResolveError> {
    let resolver = dragging_resolver();
    let plane_scene = FakeQuery {
        camera: Some(camera()),
        planes: vec![plane(Vec3::ZERO, 1)],
        ..Default::default()
    };
    let good_feature_scene = FakeQuery {
        camera: Some(camera()),
        high_quality: vec![feature(Vec3::X)],
        ..Default::default()
    };
    let any_feature_scene = FakeQuery {
        camera: Some(camera()),
        unfiltered: vec![feature(Vec3::Y)],
        ..Default::default()
    };
    let empty_scene = FakeQuery {
        camera: Some(camera()),
        ..Default::default()
    };

    // (scene, hint, allow infinite plane, expected outcome, expected known surface)
    let cases = [
        (&plane_scene, None, false, Outcome::Plane, true),
        (&plane_scene, Some(Vec3::ZERO), true, Outcome::Plane, true),
        (&good_feature_scene, None, true, Outcome::GoodFeature, false),
        (&good_feature_scene, Some(Vec3::ZERO), false, Outcome::GoodFeature, false),
        (&good_feature_scene, Some(Vec3::ZERO), true, Outcome::InfinitePlane, true),
        (&any_feature_scene, None, false, Outcome::AnyFeature, false),
        (&any_feature_scene, Some(Vec3::ZERO), false, Outcome::InfinitePlane, true),
        (&empty_scene, None, true, Outcome::Nothing, false),
        (&empty_scene, Some(Vec3::ZERO), false, Outcome::InfinitePlane, true),
    ];

    for (i, (query, hint, allow, expected, known)) in cases.into_iter().enumerate() {
        let result = resolver.resolve(query, FLOOR_PIXEL, hint, allow)?;
        assert_eq!(outcome(&result), expected, "case {i}");
        assert_eq!(result.hit_known_surface(), known, "case {i}");
    }
    Ok(())
}
