use mdexpr_core::{sum, to_dot, Expression, Shape, Store};

fn main() {
    let a = Store::<f32>::full(Shape::fixed(&[3, 4]), 1.0);
    let b = Store::<f32>::full(Shape::fixed(&[3, 4]), 2.0);
    let c = Store::<f32>::full(Shape::fixed(&[3, 4]), 3.0);
    let d = Store::<f32>::full(Shape::fixed(&[3, 4]), 4.0);

    let res = &a * &b + &c;
    let res = res + &d;

    // The tree so far, in graphviz form.
    println!("{}", to_dot(&res));

    let out = res.eval();
    dbg!(out.get(&[0, 0]).unwrap());
    assert_eq!(out.to_vec(), vec![9.0; 12]);

    println!("sum = {}", sum(&out));
}
