fn main() {
    mannequin::run_cli();
}
