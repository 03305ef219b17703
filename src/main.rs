use folio::app::App;

fn main() {
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();

    tracing::info!("mounting folio");
    leptos::mount::mount_to_body(App);
}
