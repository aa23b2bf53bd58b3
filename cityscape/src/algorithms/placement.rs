//! Procedural placement of buildings along roads and trees around them.

use crate::algorithms::boolean::union;
use crate::algorithms::envelope::Envelope;
use crate::geometry::math::{add, distance, lerp, scale};
use crate::geometry::polygon::{bbox_of, Polygon};
use crate::geometry::tolerance::EPS_SPACING;
use crate::items::{Building, Tree};
use crate::model::{Point, Segment};
use crate::world::WorldParams;
use log::trace;
use rand::Rng;

/// Consecutive rejected samples after which tree placement gives up.
pub const MAX_TREE_ATTEMPTS: usize = 100;

/// Outline segments of a wide envelope around every road, long enough to
/// host at least one building.
pub fn building_guides(roads: &[Segment], params: &WorldParams) -> Vec<Segment> {
    let width = params.road_width + params.building_width + params.spacing * 2.0;
    let mut polys: Vec<Polygon> = roads
        .iter()
        .map(|&seg| Envelope::new(seg, width, params.road_roundness).into_poly())
        .collect();
    let mut guides = union(&mut polys);
    guides.retain(|g| g.length() >= params.building_min_length);
    guides
}

/// Cut each guide into equal building slots separated by `spacing`.
///
/// A guide of length `L` holds `n = floor((L + s) / (min + s))` slots of
/// length `(L + s) / n - s`, which is at least `min`.
pub fn support_segments(guides: &[Segment], min_length: f64, spacing: f64) -> Vec<Segment> {
    let mut supports = Vec::new();
    if !(min_length + spacing > 0.0) {
        return supports;
    }
    for seg in guides {
        let len = seg.length() + spacing;
        let count = (len / (min_length + spacing)).floor() as usize;
        if count == 0 {
            continue;
        }
        let building_length = len / count as f64 - spacing;
        let dir = seg.direction_vector();

        let mut q1 = seg.p1;
        let mut q2 = add(q1, scale(dir, building_length));
        supports.push(Segment::new(q1, q2));
        for _ in 1..count {
            q1 = add(q2, scale(dir, spacing));
            q2 = add(q1, scale(dir, building_length));
            supports.push(Segment::new(q1, q2));
        }
    }
    supports
}

/// Drop footprints that overlap, or come closer than `spacing` to, an
/// earlier footprint. Earlier indices win.
pub fn remove_conflicts(bases: &mut Vec<Polygon>, spacing: f64) {
    let mut i = 0;
    while i + 1 < bases.len() {
        let mut j = i + 1;
        while j < bases.len() {
            if bases[i].intersects_poly(&bases[j])
                || bases[i].distance_to_poly(&bases[j]) < spacing - EPS_SPACING
            {
                bases.remove(j);
            } else {
                j += 1;
            }
        }
        i += 1;
    }
}

pub fn generate_buildings(roads: &[Segment], params: &WorldParams) -> Vec<Building> {
    let guides = building_guides(roads, params);
    let supports = support_segments(&guides, params.building_min_length, params.spacing);
    let mut bases: Vec<Polygon> = supports
        .into_iter()
        .map(|seg| Envelope::new(seg, params.building_width, params.building_roundness).into_poly())
        .collect();
    remove_conflicts(&mut bases, params.spacing);
    bases.into_iter().map(Building::new).collect()
}

/// Rejection-sample tree positions around roads and buildings.
///
/// Candidates come from the bounding box of the road borders and building
/// footprints. A candidate is rejected when it is inside or within
/// `tree_size / 2` of an obstacle, within `tree_size` of a placed tree, or
/// farther than `tree_size * 2` from every obstacle. Returns early, with
/// fewer than `tree_count` trees, after [`MAX_TREE_ATTEMPTS`] rejections in
/// a row.
pub fn generate_trees<R: Rng>(
    road_borders: &[Segment],
    buildings: &[Building],
    road_polys: &[&Polygon],
    params: &WorldParams,
    rng: &mut R,
) -> Vec<Tree> {
    if road_borders.is_empty() {
        return Vec::new();
    }
    let corners = road_borders
        .iter()
        .flat_map(|s| [s.p1, s.p2])
        .chain(buildings.iter().flat_map(|b| b.base.points.iter().copied()));
    let Some((left, top, right, bottom)) = bbox_of(corners) else {
        return Vec::new();
    };

    let obstacles: Vec<&Polygon> = buildings
        .iter()
        .map(|b| &b.base)
        .chain(road_polys.iter().copied())
        .collect();
    let size = params.tree_size;

    let mut trees: Vec<Tree> = Vec::new();
    let mut misses = 0;
    while trees.len() < params.tree_count && misses < MAX_TREE_ATTEMPTS {
        let p = Point::new(
            lerp(left, right, rng.gen::<f64>()),
            lerp(top, bottom, rng.gen::<f64>()),
        );

        let blocked = obstacles
            .iter()
            .any(|poly| poly.contains_point(p) || poly.distance_to_point(p) < size / 2.0);
        let crowded = || trees.iter().any(|t| distance(t.center, p) < size);
        let near_something = || obstacles.iter().any(|poly| poly.distance_to_point(p) < size * 2.0);

        if !blocked && !crowded() && near_something() {
            trees.push(Tree::new(p, size));
            misses = 0;
        } else {
            misses += 1;
        }
    }
    if trees.len() < params.tree_count {
        trace!(
            "tree placement gave up after {} misses with {}/{} trees",
            MAX_TREE_ATTEMPTS,
            trees.len(),
            params.tree_count
        );
    }
    trees
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::envelope::DEFAULT_ROUNDNESS;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn road(len: f64) -> Vec<Segment> {
        vec![Segment::new(Point::new(0.0, 0.0), Point::new(len, 0.0))]
    }

    #[test]
    fn slots_are_uniform_and_spaced() {
        let guide = Segment::new(Point::new(0.0, 0.0), Point::new(400.0, 0.0));
        let supports = support_segments(&[guide], 150.0, 50.0);
        // (400 + 50) / 200 = 2 slots of 175.
        assert_eq!(supports.len(), 2);
        assert!((supports[0].length() - 175.0).abs() < 1e-9);
        assert!((supports[1].length() - 175.0).abs() < 1e-9);
        assert!((distance(supports[0].p2, supports[1].p1) - 50.0).abs() < 1e-9);
        assert!((supports[1].p2.x - 400.0).abs() < 1e-9);
    }

    #[test]
    fn short_road_has_no_guides() {
        let params = WorldParams::default();
        assert!(building_guides(&road(100.0), &params).is_empty());
        assert!(generate_buildings(&road(100.0), &params).is_empty());
    }

    #[test]
    fn long_road_gets_buildings_on_both_sides() {
        let params = WorldParams::default();
        let buildings = generate_buildings(&road(400.0), &params);
        assert!(!buildings.is_empty());
        assert!(buildings.iter().any(|b| b.base.points.iter().all(|p| p.y > 0.0)));
        assert!(buildings.iter().any(|b| b.base.points.iter().all(|p| p.y < 0.0)));
    }

    #[test]
    fn conflicting_footprints_keep_the_first() {
        let a = Envelope::new(Segment::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0)), 20.0, 1);
        let b = Envelope::new(Segment::new(Point::new(50.0, 5.0), Point::new(150.0, 5.0)), 20.0, 1);
        let c = Envelope::new(Segment::new(Point::new(0.0, 200.0), Point::new(100.0, 200.0)), 20.0, 1);
        let mut bases = vec![a.poly.clone(), b.poly, c.poly.clone()];
        remove_conflicts(&mut bases, 50.0);
        assert_eq!(bases, vec![a.poly, c.poly]);
    }

    // Default-roundness caps end in a flat edge `width / 2 * cos 30deg` past each endpoint.
    fn capsule(x0: f64, len: f64) -> Polygon {
        let seg = Segment::new(Point::new(x0, 0.0), Point::new(x0 + len, 0.0));
        Envelope::with_default_roundness(seg, 20.0).into_poly()
    }

    #[test]
    fn footprints_exactly_spacing_apart_survive() {
        let cap = 20.0 * (std::f64::consts::PI / 6.0).cos();
        let mut bases = vec![capsule(0.0, 100.0), capsule(150.0 + cap, 100.0)];
        remove_conflicts(&mut bases, 50.0);
        assert_eq!(bases.len(), 2);

        let mut closer = vec![capsule(0.0, 100.0), capsule(140.0 + cap, 100.0)];
        remove_conflicts(&mut closer, 50.0);
        assert_eq!(closer, vec![capsule(0.0, 100.0)]);
    }

    #[test]
    fn default_footprints_are_capsules() {
        let params = WorldParams::default();
        assert_eq!(params.building_roundness, DEFAULT_ROUNDNESS);
        let buildings = generate_buildings(&road(400.0), &params);
        let vertices = 2 * (DEFAULT_ROUNDNESS as usize + 1);
        assert!(buildings.iter().all(|b| b.base.points.len() == vertices));
    }

    // A road along y = 0 and a block of houses 600 above it, leaving two
    // bands where trees of size 100 may grow.
    fn tree_scene(params: &WorldParams, seed: u64) -> (Vec<Tree>, Vec<Polygon>) {
        let road = Envelope::new(Segment::new(Point::new(0.0, 0.0), Point::new(600.0, 0.0)), 100.0, 10);
        let mut polys = vec![road.poly.clone()];
        let borders = union(&mut polys);
        let block = Polygon::new(vec![
            Point::new(0.0, 600.0),
            Point::new(600.0, 600.0),
            Point::new(600.0, 700.0),
            Point::new(0.0, 700.0),
        ]);
        let buildings = vec![Building::new(block.clone())];
        let mut rng = XorShiftRng::seed_from_u64(seed);
        let trees = generate_trees(&borders, &buildings, &[&road.poly], params, &mut rng);
        (trees, vec![block, road.poly])
    }

    fn tree_params(size: f64, count: usize) -> WorldParams {
        WorldParams { tree_size: size, tree_count: count, ..WorldParams::default() }
    }

    #[test]
    fn trees_cluster_near_obstacles() {
        let params = tree_params(100.0, 120);
        for seed in [1, 2, 3] {
            let (trees, obstacles) = tree_scene(&params, seed);
            assert!(!trees.is_empty());
            for t in &trees {
                assert!(
                    obstacles.iter().any(|o| o.distance_to_point(t.center) < params.tree_size * 2.0),
                    "tree at {:?} is far from everything",
                    t.center
                );
            }
        }
    }

    #[test]
    fn tree_count_is_reached_exactly() {
        let params = tree_params(100.0, 3);
        for seed in [4, 5, 6] {
            let (trees, _) = tree_scene(&params, seed);
            assert_eq!(trees.len(), 3);
        }
    }

    #[test]
    fn zero_size_trees_give_up() {
        // Nothing is within zero distance of an obstacle, so every sample misses.
        let (trees, _) = tree_scene(&tree_params(0.0, 10), 9);
        assert!(trees.is_empty());
    }

    #[test]
    fn trees_keep_their_distance() {
        let params = WorldParams::default();
        let roads = road(600.0);
        let envelopes: Vec<Envelope> = roads
            .iter()
            .map(|&s| Envelope::new(s, params.road_width, params.road_roundness))
            .collect();
        let mut polys: Vec<Polygon> = envelopes.iter().map(|e| e.poly.clone()).collect();
        let borders = union(&mut polys);
        let buildings = generate_buildings(&roads, &params);
        let road_polys: Vec<&Polygon> = envelopes.iter().map(|e| &e.poly).collect();
        let mut rng = XorShiftRng::seed_from_u64(7);
        let trees = generate_trees(&borders, &buildings, &road_polys, &params, &mut rng);

        assert!(trees.len() <= params.tree_count);
        for (i, a) in trees.iter().enumerate() {
            for b in &trees[i + 1..] {
                assert!(distance(a.center, b.center) >= params.tree_size);
            }
            for poly in road_polys.iter().copied().chain(buildings.iter().map(|b| &b.base)) {
                assert!(!poly.contains_point(a.center));
                assert!(poly.distance_to_point(a.center) >= params.tree_size / 2.0);
            }
        }
    }

    #[test]
    fn no_borders_no_trees() {
        let mut rng = XorShiftRng::seed_from_u64(1);
        assert!(generate_trees(&[], &[], &[], &WorldParams::default(), &mut rng).is_empty());
    }
}
