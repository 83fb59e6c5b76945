use classic_collections::splay_tree::SplayTree;
use rand::Rng;

const NUM_OF_OPERATIONS: usize = 10_000;

#[test]
fn int_test_splay_tree() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut tree = SplayTree::new();
    let mut expected = Vec::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let value = rng.gen_range(0, 5000u32);
        tree.insert(value);
        assert_eq!(tree.root(), Some(&value));
        expected.push(value);
    }
    assert_eq!(tree.validate(), Ok(()));

    expected.sort();
    assert_eq!(tree.len(), expected.len());
    assert_eq!(
        tree.iter().collect::<Vec<&u32>>(),
        expected.iter().collect::<Vec<&u32>>(),
    );

    for _ in 0..NUM_OF_OPERATIONS {
        let value = rng.gen_range(0, 5500u32);
        let found = expected.binary_search(&value).is_ok();
        assert_eq!(tree.contains(&value), found);
        if found {
            assert_eq!(tree.root(), Some(&value));
            assert_eq!(tree.get(&value), Some(&value));
        }
    }
    assert_eq!(tree.validate(), Ok(()));

    rng.shuffle(&mut expected);

    let mut expected_len = expected.len();
    for value in &expected {
        assert_eq!(tree.remove(value), Some(*value));
        expected_len -= 1;
        assert_eq!(tree.len(), expected_len);
    }
    assert!(tree.is_empty());
    assert_eq!(tree.root(), None);
}

#[test]
fn int_test_splay_tree_remove_neighbour_at_root() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut tree = SplayTree::new();
    let mut expected = Vec::new();
    while expected.len() < 2000 {
        let value = rng.gen::<u32>();
        if expected.binary_search(&value).is_err() {
            tree.insert(value);
            let index = expected.binary_search(&value).unwrap_err();
            expected.insert(index, value);
        }
    }

    while !expected.is_empty() {
        let index = rng.gen_range(0, expected.len());
        let value = expected.remove(index);
        assert_eq!(tree.remove(&value), Some(value));
        if !expected.is_empty() {
            let neighbour = if index < expected.len() {
                expected[index]
            } else {
                expected[index - 1]
            };
            assert_eq!(tree.root(), Some(&neighbour));
        }
    }
    assert_eq!(tree.validate(), Ok(()));
}

#[test]
fn int_test_splay_tree_min_max() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut tree = SplayTree::new();
    let mut expected = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let value = rng.gen::<u32>();
        tree.insert(value);
        expected.push(value);
    }
    expected.sort();

    assert_eq!(tree.min(), expected.first());
    assert_eq!(tree.root(), expected.first());
    assert_eq!(tree.max(), expected.last());
    assert_eq!(tree.root(), expected.last());

    while !expected.is_empty() {
        if rng.gen::<bool>() {
            assert_eq!(tree.remove_min(), Some(expected.remove(0)));
        } else {
            assert_eq!(tree.remove_max(), expected.pop());
        }
    }
    assert_eq!(tree.validate(), Ok(()));
}
