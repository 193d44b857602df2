use mdexpr_core::{matmul, permute, transpose, Error, Expression, Extent, Shape, Store};

fn counting_grid(rows: usize, cols: usize) -> Store<i32> {
    Store::from_fn(Shape::fixed(&[rows, cols]), |ix| {
        (ix[0] * cols + ix[1] + 1) as i32
    })
}

#[test]
fn rank2_transpose_swaps_extents_and_indices() {
    let m = counting_grid(2, 3);
    let t = transpose(&m);
    assert_eq!(t.shape().sizes(), vec![3, 2]);
    for i in 0..2 {
        for j in 0..3 {
            assert_eq!(t.at(&[j, i]), m.at(&[i, j]));
        }
    }
    assert_eq!(t.eval().to_vec(), vec![1, 4, 2, 5, 3, 6]);
}

#[test]
fn double_transpose_is_identity() {
    let m = counting_grid(3, 4);
    let back = transpose(transpose(&m));
    assert_eq!(back.shape().sizes(), vec![3, 4]);
    assert_eq!(back.eval().to_vec(), m.to_vec());
}

#[test]
fn rank1_transpose_is_a_no_op() {
    let v = Store::from_vec(vec![5_i32, 6, 7], Shape::fixed(&[3])).unwrap();
    let t = transpose(&v);
    assert_eq!(t.shape().sizes(), vec![3]);
    assert_eq!(t.eval().to_vec(), vec![5, 6, 7]);
}

#[test]
fn rank3_permutation_reroutes_indices() {
    let src = Store::<i32>::from_fn(Shape::fixed(&[2, 3, 4]), |ix| {
        (ix[0] * 100 + ix[1] * 10 + ix[2]) as i32
    });
    let p = permute(&src, &[2, 0, 1]).unwrap();
    assert_eq!(p.shape().sizes(), vec![4, 2, 3]);
    // Output axis k reads source axis order[k].
    assert_eq!(p.at(&[3, 1, 2]), src.at(&[1, 2, 3]));
    assert_eq!(p.at(&[0, 0, 0]), src.at(&[0, 0, 0]));
}

#[test]
fn identity_permutation_changes_nothing() {
    let src = counting_grid(2, 3);
    let p = permute(&src, &[0, 1]).unwrap();
    assert_eq!(p.eval().to_vec(), src.to_vec());
}

#[test]
fn permute_rejects_non_bijections() {
    let src = Store::<i32>::zeros(Shape::fixed(&[2, 3, 4]));
    assert!(permute(&src, &[0]).is_err());
    assert!(permute(&src, &[0, 1, 2, 3]).is_err());
    assert!(permute(&src, &[0, 1, 5]).is_err());
    match permute(&src, &[0, 0, 2]) {
        Err(Error::InvalidPermutation { rank, perm }) => {
            assert_eq!(rank, 3);
            assert_eq!(perm, vec![0, 0, 2]);
        }
        _ => panic!("expected an invalid permutation"),
    }
}

#[test]
fn fixedness_travels_with_the_axis() {
    let src = Store::<i32>::zeros(Shape::build(&[Extent::Fixed(2), Extent::Dynamic], &[3]));
    let t = transpose(&src);
    assert_eq!(t.shape().sizes(), vec![3, 2]);
    assert!(!t.shape().is_fixed(0));
    assert!(t.shape().is_fixed(1));
}

#[test]
fn transpose_of_an_expression_stays_lazy() {
    use mdexpr_core::map;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let calls = AtomicUsize::new(0);
    let m = counting_grid(2, 3);
    let counted = map(&m, |v: i32| {
        calls.fetch_add(1, Ordering::Relaxed);
        v
    });
    let t = transpose(counted);
    assert_eq!(calls.load(Ordering::Relaxed), 0);
    assert_eq!(t.at(&[2, 1]), 6);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn gram_matrix_via_transpose() {
    let m = counting_grid(2, 3);
    let t = transpose(&m);
    let gram = matmul(&m, &t).unwrap().eval();
    assert_eq!(gram.shape().sizes(), vec![2, 2]);
    assert_eq!(gram.to_vec(), vec![14, 32, 32, 77]);
}
