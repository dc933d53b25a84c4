use wasm_bindgen::prelude::*;
use chembalance::balance_equation;


// Export a `equation_io` function from Rust to JavaScript.
#[wasm_bindgen]
/// Process input equation and return output
/// First char is 1 if balancing succeeded (followed by the balanced equation), 0 if not (followed by the error)
pub fn equation_io(equation: &str) -> String {
    match balance_equation(equation) {
        Ok(balanced) => format!("1{}", balanced),
        Err(err) => format!("0{}", err),
    }
}
