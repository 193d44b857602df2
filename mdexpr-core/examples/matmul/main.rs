use std::time::Instant;

use mdexpr_core::{matmul, permute, Expression, Shape, Store};

fn time_product(n: usize) {
    let a = Store::<f32>::rand(Shape::fixed(&[1, n, n]));
    let b = Store::<f32>::rand(Shape::fixed(&[1, n, n]));

    // A transposed right operand exercises the lazy axis remap.
    let bt = permute(&b, &[0, 2, 1]).unwrap();
    let prod = matmul(&a, &bt).unwrap();

    let start = Instant::now();
    let out = std::hint::black_box(prod.eval());
    let elapsed = start.elapsed();

    println!(
        "batched {n}x{n} matmul in {elapsed:?}; out shape {}",
        out.shape()
    );
}

fn main() {
    let m = Store::from_vec(vec![1.0_f32, 2.0, 3.0, 4.0], Shape::fixed(&[2, 2])).unwrap();
    let prod = matmul(&m, &m).unwrap().eval();
    dbg!(prod.data());
    assert_eq!(prod.to_vec(), vec![7.0, 10.0, 15.0, 22.0]);

    time_product(64);
    time_product(128);
}
