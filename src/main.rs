
use eigenwords::Pipeline;

fn main() {
    Pipeline::run();
}
