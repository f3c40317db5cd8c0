use ThermoStack::Examples::props_examples::props_examples;
use ThermoStack::Utils::logger::init_logger;
use simplelog::LevelFilter;

pub fn main() {
    if let Err(e) = init_logger(LevelFilter::Info) {
        eprintln!("logger not installed: {}", e);
    }
    //
    let task: usize = 1;
    props_examples(task);
}
