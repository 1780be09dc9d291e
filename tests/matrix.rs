use rand::rngs::StdRng;
use rand::SeedableRng;
use tinyllm::llm::tensor::{self, Matrix};

#[test]
fn test_transpose_of_product() {
    let mut rng = StdRng::seed_from_u64(1);
    for (m, k, n) in [(1, 1, 1), (2, 3, 4), (5, 2, 3), (7, 7, 1)] {
        let a = tensor::initialize(m, k, &mut rng);
        let b = tensor::initialize(k, n, &mut rng);

        let lhs = tensor::transpose(&tensor::matmul(&a, &b).unwrap()).unwrap();
        let rhs = tensor::matmul(
            &tensor::transpose(&b).unwrap(),
            &tensor::transpose(&a).unwrap(),
        )
        .unwrap();
        assert_eq!(lhs.shape(), (n, m));
        assert!(lhs.max_abs_diff(&rhs).unwrap() < 1e-5);
    }
}

#[test]
fn test_softmax_rows_are_distributions() {
    let mut rng = StdRng::seed_from_u64(2);
    let scores = tensor::apply_function(&tensor::initialize(6, 9, &mut rng), |x| x * 50.0);
    let probs = tensor::softmax(&scores).unwrap();

    assert_eq!(probs.shape(), (6, 9));
    for row in probs.iter_rows() {
        let sum: f32 = row.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(row.iter().all(|&p| p >= 0.0));
    }
}

#[test]
fn test_head_split_and_merge_round_trip() {
    let mut rng = StdRng::seed_from_u64(3);
    let x = tensor::initialize(4, 12, &mut rng);
    let heads: Vec<Matrix> = (0..3)
        .map(|h| tensor::slice(&x, 0, 4, h * 4, (h + 1) * 4).unwrap())
        .collect();
    assert_eq!(tensor::concat_columns(&heads).unwrap(), x);
}
