use super::*;

const PARAMS: TreeParams = TreeParams {
    max_depth: 4,
    min_leaf_samples: 1,
};

fn row(price: f64) -> [f64; FEATURE_COUNT] {
    [10.0, 0.0, 20.0, 0.0, 0.0, 50.0, price]
}

#[test]
fn test_constant_targets_give_single_leaf() {
    let rows: Vec<_> = (0..10).map(|i| row(50.0 + i as f64 * 10.0)).collect();
    let targets = vec![7.0; 10];
    let indices: Vec<usize> = (0..10).collect();
    let tree = RegressionTree::fit(&rows, &targets, &indices, PARAMS);
    for r in &rows {
        assert!((tree.predict(r) - 7.0).abs() < 1e-12);
    }
}

#[test]
fn test_single_threshold_recovered() {
    // Demand drops at price >= 150
    let rows: Vec<_> = (0..20).map(|i| row(50.0 + i as f64 * 10.0)).collect();
    let targets: Vec<f64> = rows
        .iter()
        .map(|r| if r[6] < 150.0 { 80.0 } else { 30.0 })
        .collect();
    let indices: Vec<usize> = (0..rows.len()).collect();
    let tree = RegressionTree::fit(&rows, &targets, &indices, PARAMS);

    assert!((tree.predict(&row(100.0)) - 80.0).abs() < 1e-9);
    assert!((tree.predict(&row(200.0)) - 30.0).abs() < 1e-9);
}

#[test]
fn test_two_feature_interaction() {
    // Target depends on the rain flag and a price threshold
    let mut rows = Vec::new();
    let mut targets = Vec::new();
    for i in 0..20 {
        for rain in [0.0, 1.0] {
            let mut r = row(50.0 + i as f64 * 10.0);
            r[3] = rain;
            let base = if r[6] < 150.0 { 60.0 } else { 40.0 };
            rows.push(r);
            targets.push(base - rain * 30.0);
        }
    }
    let indices: Vec<usize> = (0..rows.len()).collect();
    let tree = RegressionTree::fit(&rows, &targets, &indices, PARAMS);

    let mut rainy_cheap = row(100.0);
    rainy_cheap[3] = 1.0;
    assert!((tree.predict(&rainy_cheap) - 30.0).abs() < 1e-9);

    let dry_expensive = row(250.0);
    assert!((tree.predict(&dry_expensive) - 40.0).abs() < 1e-9);
}

#[test]
fn test_min_leaf_blocks_tiny_splits() {
    let rows: Vec<_> = (0..4).map(|i| row(50.0 + i as f64 * 10.0)).collect();
    let targets = vec![1.0, 1.0, 1.0, 100.0];
    let indices: Vec<usize> = (0..4).collect();
    let params = TreeParams {
        max_depth: 4,
        min_leaf_samples: 3,
    };
    let tree = RegressionTree::fit(&rows, &targets, &indices, params);
    // Splitting would leave a child below min_leaf, so all rows share one leaf
    let mean = (1.0 + 1.0 + 1.0 + 100.0) / 4.0;
    assert!((tree.predict(&row(50.0)) - mean).abs() < 1e-9);
}

#[test]
fn test_fit_is_deterministic() {
    let rows: Vec<_> = (0..30).map(|i| row(50.0 + (i % 10) as f64 * 25.0)).collect();
    let targets: Vec<f64> = (0..30).map(|i| (i % 7) as f64 * 3.0).collect();
    let indices: Vec<usize> = (0..rows.len()).collect();
    let a = RegressionTree::fit(&rows, &targets, &indices, PARAMS);
    let b = RegressionTree::fit(&rows, &targets, &indices, PARAMS);
    for r in &rows {
        assert_eq!(a.predict(r), b.predict(r));
    }
}
