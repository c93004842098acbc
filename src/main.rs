use hello_triangle::abs::App;
use hello_triangle::config::Config;
use hello_triangle::{logging, runner};

fn main() {
    logging::init();
    let config = Config::load();

    let status = runner::launch(|| App::new(&config), config.lesson, config.clear_color());
    std::process::exit(status);
}
