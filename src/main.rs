use nalgebra::DVector;
use polyapprox::approximation::polynomial::Polynomial;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn main() {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .unwrap();

    let example = 2;
    match example {
        0 => {
            // BASIC EVALUATION
            // 2 variables, degrees [1, 2] -> basis of 2*3 = 6 monomials
            let poly =
                Polynomial::with_coefficients(vec![1, 2], DVector::from_element(6, 1.0)).unwrap();
            println!("{}", poly.description());
            println!("basis size = {}", poly.num_coefficients());
            let x = DVector::from_vec(vec![2.0, 3.0]);
            // with unit coefficients this is the sum of all monomials:
            // (1 + 2) * (1 + 3 + 9) = 39
            println!("p(2, 3) = {}", poly.eval(&x).unwrap());
            let basis = poly.eval_basis_functions(&x).unwrap();
            println!("monomials at (2, 3) = {:?}", basis.to_dense());
        }
        1 => {
            // GRADIENT
            // f(x0, x1) = 2 * x0 * x1^2
            let mut coeffs = DVector::zeros(6);
            coeffs[5] = 2.0;
            let poly = Polynomial::with_coefficients(vec![1, 2], coeffs).unwrap();
            let x = DVector::from_fn(2, |_, _| 4.0 * rand::random::<f64>() - 2.0);
            let grad = poly.eval_jacobian(&x).unwrap();
            println!("grad p({:.3}, {:.3}) = {:?}", x[0], x[1], grad);
            // analytic gradient for comparison
            println!(
                "expected = [{}, {}]",
                2.0 * x[1] * x[1],
                4.0 * x[0] * x[1]
            );
        }
        2 => {
            // SAVE AND LOAD
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("poly.txt");
            let coeffs = DVector::from_vec(vec![0.5, -1.25, 3.0, 0.1, 7.0, -0.75]);
            let poly = Polynomial::with_coefficients(vec![1, 2], coeffs).unwrap();
            poly.save(&path).unwrap();

            let restored = Polynomial::from_file(&path).unwrap();
            println!("restored: {}", restored.description());
            let x = DVector::from_vec(vec![-1.5, 0.25]);
            println!(
                "original p(x) = {}, restored p(x) = {}",
                poly.eval(&x).unwrap(),
                restored.eval(&x).unwrap()
            );
        }
        _ => {}
    }
}
