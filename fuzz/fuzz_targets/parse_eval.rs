#![no_main]
use libfuzzer_sys::fuzz_target;

use treecalc::ExpressionNode;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(tree) = treecalc::parse::<f64>(s) {
            let _ = treecalc::evaluate(&tree);
            let _ = tree.to_string().parse::<ExpressionNode<f64>>();
        }
    }
});
