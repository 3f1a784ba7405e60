fn main() -> std::io::Result<()> {
    procdraw_cli::main()
}
