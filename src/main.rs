pub fn main() {
    bond_pricer::init_logging();
    if let Err(e) = bond_pricer::get_args().and_then(bond_pricer::run) {
        println!("{}", e);
        std::process::exit(1);
    }
}
