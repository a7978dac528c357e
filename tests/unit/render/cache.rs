use super::*;

fn frame(c: char) -> RenderOutput {
    RenderOutput {
        characters: vec![vec![c]],
        colors: vec![vec!["#000000".to_owned()]],
    }
}

#[test]
fn empty_cache_misses() {
    let cache = RenderCache::default();
    assert!(cache.lookup(&Viewport::new(0, 0, 1, 1)).is_none());
}

#[test]
fn hit_requires_same_viewport() {
    let mut cache = RenderCache::default();
    let vp = Viewport::new(0, 0, 1, 1);
    cache.store(vp, &frame('x'));

    assert_eq!(cache.lookup(&vp), Some(frame('x')));
    assert!(cache.lookup(&Viewport::new(1, 0, 1, 1)).is_none());
    assert!(cache.lookup(&Viewport::new(0, 0, 2, 1)).is_none());
}

#[test]
fn invalidate_forces_miss_until_next_store() {
    let mut cache = RenderCache::default();
    let vp = Viewport::new(0, 0, 1, 1);
    cache.store(vp, &frame('x'));
    cache.invalidate();
    assert!(cache.is_dirty());
    assert!(cache.lookup(&vp).is_none());

    cache.store(vp, &frame('y'));
    assert!(!cache.is_dirty());
    assert_eq!(cache.lookup(&vp), Some(frame('y')));
}

#[test]
fn lookups_are_independent_copies() {
    let mut cache = RenderCache::default();
    let vp = Viewport::new(0, 0, 1, 1);
    cache.store(vp, &frame('x'));

    let mut first = cache.lookup(&vp).unwrap();
    first.characters[0][0] = '!';
    assert_eq!(cache.lookup(&vp), Some(frame('x')));
}
