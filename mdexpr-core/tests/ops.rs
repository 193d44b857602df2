use mdexpr_core::{map, zip, AddOp, Error, Expression, Shape, Store};

macro_rules! arith_suite {
    ($dtype:ty, $dtype_mod:ident) => {
        mod $dtype_mod {
            use super::*;

            /// 2x3 grid holding 1..=6 in row-major order.
            fn grid() -> Store<$dtype> {
                Store::from_fn(Shape::fixed(&[2, 3]), |ix| (ix[0] * 3 + ix[1] + 1) as $dtype)
            }

            #[test]
            fn add_then_mul_fuses_per_element() {
                let a = grid();
                let b = Store::full(Shape::fixed(&[2, 3]), 2 as $dtype);
                let out = ((&a + &b) * &a).eval();
                let expect: Vec<$dtype> = (1..=6)
                    .map(|v| ((v as $dtype) + (2 as $dtype)) * (v as $dtype))
                    .collect();
                assert_eq!(out.to_vec(), expect);
            }

            #[test]
            fn sub_and_div() {
                let a = grid();
                let ones: Store<$dtype> = Store::ones(Shape::fixed(&[2, 3]));
                let twos = Store::full(Shape::fixed(&[2, 3]), 2 as $dtype);
                let out = ((&a - &ones) / &twos).eval();
                let expect: Vec<$dtype> = (1..=6)
                    .map(|v| ((v as $dtype) - (1 as $dtype)) / (2 as $dtype))
                    .collect();
                assert_eq!(out.to_vec(), expect);
            }

            #[test]
            fn scalar_forms_fold_the_constant_in() {
                let a = grid();
                let doubled = (2 as $dtype) * &a;
                let halved = &a / (2 as $dtype);
                let inverted = (6 as $dtype) / &a;
                assert_eq!(doubled.at(&[1, 2]), (12) as $dtype);
                assert_eq!(halved.at(&[1, 2]), (6 as $dtype) / (2 as $dtype));
                assert_eq!(inverted.at(&[0, 2]), (6 as $dtype) / (3 as $dtype));
            }

            #[test]
            fn longer_chain_evaluates_once_per_element() {
                let a = grid();
                let b = Store::full(Shape::fixed(&[2, 3]), 2 as $dtype);
                let out = ((&a + &b) * &a - &b).eval();
                let expect: Vec<$dtype> = (1..=6)
                    .map(|v| {
                        ((v as $dtype) + (2 as $dtype)) * (v as $dtype) - (2 as $dtype)
                    })
                    .collect();
                assert_eq!(out.to_vec(), expect);
            }
        }
    };
}

arith_suite!(u8, u8_ops);
arith_suite!(u32, u32_ops);
arith_suite!(i32, i32_ops);
arith_suite!(i64, i64_ops);
arith_suite!(f32, f32_ops);
arith_suite!(f64, f64_ops);

macro_rules! neg_suite {
    ($dtype:ty, $dtype_mod:ident) => {
        mod $dtype_mod {
            use super::*;

            #[test]
            fn negation_is_elementwise() {
                let a: Store<$dtype> =
                    Store::from_fn(Shape::fixed(&[2, 2]), |ix| (ix[0] * 2 + ix[1] + 1) as $dtype);
                let out = (-&a).eval();
                let expect: Vec<$dtype> = (1..=4).map(|v| -(v as $dtype)).collect();
                assert_eq!(out.to_vec(), expect);
            }
        }
    };
}

neg_suite!(i32, i32_neg);
neg_suite!(i64, i64_neg);
neg_suite!(f32, f32_neg);
neg_suite!(f64, f64_neg);

#[cfg(feature = "half")]
mod f16_ops {
    use super::*;
    use half::f16;

    #[test]
    fn add_then_eval() {
        let x = Store::<f16>::full(Shape::fixed(&[3, 4]), f16::from_f32_const(1.0));
        let y = Store::<f16>::full(Shape::fixed(&[3, 4]), f16::from_f32_const(2.0));
        let out = (&x + &y).eval();
        assert_eq!(out.to_vec(), vec![f16::from_f32_const(3.0); 12]);
    }

    #[test]
    fn scalar_scale() {
        let x = Store::<f16>::full(Shape::fixed(&[4]), f16::from_f32_const(1.5));
        let out = (x * f16::from_f32_const(2.0)).eval();
        assert_eq!(out.to_vec(), vec![f16::from_f32_const(3.0); 4]);
    }
}

#[cfg(feature = "bfloat")]
mod bf16_ops {
    use super::*;
    use half::bf16;

    #[test]
    fn add_then_eval() {
        let x = Store::<bf16>::full(Shape::fixed(&[3, 4]), bf16::from_f32_const(1.0));
        let y = Store::<bf16>::full(Shape::fixed(&[3, 4]), bf16::from_f32_const(2.0));
        let out = (&x + &y).eval();
        assert_eq!(out.to_vec(), vec![bf16::from_f32_const(3.0); 12]);
    }
}

#[test]
fn building_is_lazy_and_access_is_per_element() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let calls = AtomicUsize::new(0);
    let a = Store::<i32>::from_fn(Shape::fixed(&[2, 3]), |ix| (ix[0] * 3 + ix[1]) as i32);
    let probe = map(&a, |v: i32| {
        calls.fetch_add(1, Ordering::Relaxed);
        v * 10
    });
    let tree = &probe + &a;

    // Construction alone ran nothing.
    assert_eq!(calls.load(Ordering::Relaxed), 0);

    // One subscript pulls exactly one element through the map.
    assert_eq!(tree.at(&[1, 0]), 33);
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    // Materialization touches each element once more.
    let out = tree.eval();
    assert_eq!(calls.load(Ordering::Relaxed), 7);
    assert_eq!(out.to_vec(), vec![0, 11, 22, 33, 44, 55]);
}

#[test]
fn map_can_change_element_type() {
    let a = Store::<i32>::from_fn(Shape::fixed(&[2, 2]), |ix| (ix[0] * 2 + ix[1]) as i32 - 1);
    let widened = map(&a, |v: i32| v as f64 + 0.5);
    assert_eq!(widened.at(&[0, 0]), -0.5);
    assert_eq!(widened.eval().to_vec(), vec![-0.5, 0.5, 1.5, 2.5]);
}

#[test]
fn zip_with_closure() {
    let a = Store::from_vec(vec![1_i32, 5, 2, 7], Shape::fixed(&[2, 2])).unwrap();
    let b = Store::from_vec(vec![4_i32, 3, 9, 0], Shape::fixed(&[2, 2])).unwrap();
    let bigger = zip(&a, &b, |x: i32, y: i32| if x > y { x } else { y }).unwrap();
    assert_eq!(bigger.eval().to_vec(), vec![4, 5, 9, 7]);
}

#[test]
fn zip_rejects_mismatched_extents() {
    let a = Store::<i32>::zeros(Shape::fixed(&[2, 3]));
    let b = Store::<i32>::zeros(Shape::fixed(&[2, 4]));
    match zip(&a, &b, AddOp) {
        Err(Error::ShapeMismatch { axis, .. }) => assert_eq!(axis, 1),
        _ => panic!("expected a shape mismatch"),
    }
}

#[test]
#[should_panic(expected = "differ at axis")]
fn operator_panics_on_mismatch() {
    let a = Store::<i32>::zeros(Shape::fixed(&[2, 3]));
    let b = Store::<i32>::zeros(Shape::fixed(&[2, 3, 1]));
    let _ = &a * &b;
}

#[test]
fn shared_operand_diamond() {
    let m = Store::from_vec(vec![1_i32, 2, 3, 4], Shape::fixed(&[2, 2])).unwrap();
    let mixed = (&m + &m * &m).eval();
    assert_eq!(mixed.to_vec(), vec![2, 6, 12, 20]);

    let shared = &m + &m;
    let diamond = (&shared * &shared).eval();
    assert_eq!(diamond.to_vec(), vec![4, 16, 36, 64]);
}

mod integer_division {
    use super::*;

    #[test]
    fn scalar_divide_truncates() {
        let m = Store::from_vec(vec![1_i32, 2, 3, 4], Shape::fixed(&[2, 2])).unwrap();
        let halved = (&m / 2_i32).eval();
        assert_eq!(halved.to_vec(), vec![0, 1, 1, 2]);
    }

    #[test]
    fn scalar_over_expression_reciprocates() {
        let m = Store::from_vec(vec![1.0_f64, 2.0, 4.0, 8.0], Shape::fixed(&[2, 2])).unwrap();
        let recip = (2.0_f64 / &m).eval();
        assert_eq!(recip.to_vec(), vec![2.0, 1.0, 0.5, 0.25]);
    }
}
