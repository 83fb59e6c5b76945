const NUM_OF_OPERATIONS: usize = 10_000;

macro_rules! tree_tests {
    ($($module_name:ident: $type_name:ident$(,)*)*) => {
        $(
            mod $module_name {
                use classic_collections::$module_name::$type_name;
                use classic_collections::tree::TraversalOrder;
                use rand::Rng;
                use super::NUM_OF_OPERATIONS;

                #[test]
                fn int_test_tree() {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                    let mut tree = $type_name::new();
                    let mut expected = Vec::new();

                    for _ in 0..NUM_OF_OPERATIONS {
                        let value = rng.gen_range(0, 1000u32);
                        tree.insert(value);
                        expected.push(value);
                    }
                    assert_eq!(tree.validate(), Ok(()));

                    expected.sort();
                    assert_eq!(tree.len(), expected.len());
                    assert_eq!(
                        tree.iter().collect::<Vec<&u32>>(),
                        expected.iter().collect::<Vec<&u32>>(),
                    );
                    assert_eq!(tree.min(), expected.first());
                    assert_eq!(tree.max(), expected.last());
                    assert_eq!(tree.traverse(TraversalOrder::PreOrder).count(), expected.len());
                    assert_eq!(tree.traverse(TraversalOrder::PostOrder).count(), expected.len());
                    assert_eq!(tree.level_order().count(), expected.len());

                    for _ in 0..1000 {
                        let value = rng.gen_range(0, 1100u32);
                        assert_eq!(tree.contains(&value), expected.binary_search(&value).is_ok());
                        let floor = expected.iter().rev().find(|other| **other <= value);
                        assert_eq!(tree.floor(&value), floor);
                    }

                    rng.shuffle(&mut expected);

                    let mut expected_len = expected.len();
                    for (index, value) in expected.iter().enumerate() {
                        assert_eq!(tree.remove(value), Some(*value));
                        expected_len -= 1;
                        assert_eq!(tree.len(), expected_len);
                        if index % 1000 == 0 {
                            assert_eq!(tree.validate(), Ok(()));
                        }
                    }
                    assert!(tree.is_empty());
                    assert_eq!(tree.depth(), 0);
                }

                #[test]
                fn int_test_tree_remove_min_max() {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                    let mut tree = $type_name::new();
                    let mut expected = Vec::new();

                    for _ in 0..NUM_OF_OPERATIONS {
                        let value = rng.gen::<u32>();
                        tree.insert(value);
                        expected.push(value);
                    }
                    expected.sort();

                    while !expected.is_empty() {
                        if rng.gen::<bool>() {
                            assert_eq!(tree.remove_min(), Some(expected.remove(0)));
                        } else {
                            assert_eq!(tree.remove_max(), expected.pop());
                        }
                    }
                    assert_eq!(tree.remove_min(), None);
                    assert_eq!(tree.validate(), Ok(()));
                }
            }
        )*
    }
}

tree_tests!(
    tree: BinarySearchTree,
    avl_tree: AvlTree,
    red_black_tree: RedBlackTree,
);

mod balance {
    use classic_collections::avl_tree::AvlTree;
    use classic_collections::red_black_tree::RedBlackTree;
    use rand::Rng;

    fn log2(len: usize) -> f64 {
        (len as f64).log2()
    }

    #[test]
    fn int_test_avl_depth() {
        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
        let mut tree = AvlTree::new();
        for value in 0..20_000u32 {
            tree.insert(value);
        }
        assert!(tree.depth() as f64 <= 1.44 * log2(tree.len() + 2));

        for _ in 0..15_000 {
            let value = rng.gen_range(0, 20_000u32);
            tree.remove(&value);
            assert!(tree.depth() as f64 <= 1.44 * log2(tree.len() + 2) + 1.0);
        }
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn int_test_red_black_depth() {
        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
        let mut tree = RedBlackTree::new();
        for value in 0..20_000u32 {
            tree.insert(value);
        }
        assert!(tree.depth() as f64 <= 2.0 * log2(tree.len() + 1));

        for _ in 0..15_000 {
            let value = rng.gen_range(0, 20_000u32);
            tree.remove(&value);
            assert!(tree.depth() as f64 <= 2.0 * log2(tree.len() + 1));
        }
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn int_test_red_black_sample() {
        let tree = RedBlackTree::from_slice(&[50, 30, 70, 20, 40, 60, 80]);
        assert_eq!(
            tree.iter().cloned().collect::<Vec<u32>>(),
            vec![20, 30, 40, 50, 60, 70, 80],
        );
        assert_eq!(tree.validate(), Ok(()));
    }
}
