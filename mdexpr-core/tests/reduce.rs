use mdexpr_core::{all, any, max, min, reduce, sum, Expression, Shape, Store};

fn quad() -> Store<i32> {
    Store::from_vec(vec![1, 2, 3, 4], Shape::fixed(&[2, 2])).unwrap()
}

#[test]
fn sum_of_a_store() {
    assert_eq!(sum(&quad()), 10);
}

#[test]
fn sum_of_a_lazy_tree() {
    let m1 = quad();
    let m2 = Store::from_vec(vec![4, 3, 2, 1], Shape::fixed(&[2, 2])).unwrap();
    // No intermediate array: the zip feeds the fold directly.
    assert_eq!(sum(&m1 + &m2), 20);
}

#[test]
fn min_and_max() {
    let m = quad();
    assert_eq!(min(&m), 1);
    assert_eq!(max(&m), 4);
}

#[test]
fn float_extrema() {
    let m = Store::from_vec(vec![-3.5_f32, 2.0, 7.25, -8.5], Shape::fixed(&[4])).unwrap();
    assert_eq!(min(&m), -8.5);
    assert_eq!(max(&m), 7.25);
}

#[test]
fn reduction_result_feeds_a_new_tree() {
    let m = quad();
    let total = sum(&m);
    let scaled = (&m * total).eval();
    assert_eq!(scaled.to_vec(), vec![10, 20, 30, 40]);
}

#[test]
fn fold_order_is_row_major_and_deterministic() {
    let m = quad();
    // Appending digits is order-sensitive; row-major order gives 1234
    // on every run.
    let digits = reduce(&m, 0_i64, |acc, v: i32| acc * 10 + v as i64).evaluate();
    assert_eq!(digits, 1234);
}

#[test]
fn accumulator_type_is_free() {
    let m = quad();
    let joined = reduce(&m, String::new(), |mut acc, v: i32| {
        acc.push_str(&v.to_string());
        acc
    })
    .evaluate();
    assert_eq!(joined, "1234");
}

#[test]
fn evaluate_can_repeat() {
    let m = quad();
    let folded = reduce(&m, 0_i32, |acc, v: i32| acc + v);
    assert_eq!(folded.evaluate(), 10);
    assert_eq!(folded.evaluate(), 10);
}

#[test]
fn all_and_any() {
    let m = quad();
    assert!(all(&m, |v: i32| v > 0));
    assert!(!all(&m, |v: i32| v > 2));
    assert!(any(&m, |v: i32| v == 3));
    assert!(!any(&m, |v: i32| v > 9));
}

mod empty_sources {
    use super::*;

    fn hollow() -> Store<i32> {
        Store::zeros(Shape::fixed(&[0, 3]))
    }

    #[test]
    fn folds_yield_the_seed() {
        assert_eq!(sum(&hollow()), 0);
        assert_eq!(min(&hollow()), i32::MAX);
        assert_eq!(max(&hollow()), i32::MIN);
    }

    #[test]
    fn quantifiers_are_vacuous() {
        assert!(all(&hollow(), |v: i32| v == 42));
        assert!(!any(&hollow(), |v: i32| v == 42));
    }
}
