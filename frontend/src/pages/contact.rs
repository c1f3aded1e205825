use crate::pages::landing::PublicNavbar;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const CONTACT_EMAIL: &str = "synergia.adm@outlook.com";
const CONTACT_PHONE: &str = "+55 11 99999-9999";

#[component]
pub fn ContactPage() -> impl IntoView {
    let nome = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let mensagem = RwSignal::new(String::new());
    let (loading, set_loading) = signal(false);
    let (success, set_success) = signal(Option::<String>::None);

    // no contact endpoint: the message is acknowledged locally
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_loading.set(true);
        set_success.set(None);

        spawn_local(async move {
            TimeoutFuture::new(1_500).await;
            nome.set(String::new());
            email.set(String::new());
            mensagem.set(String::new());
            set_success.set(Some("Mensagem enviada com sucesso!".to_string()));
            set_loading.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-base-100">
            <PublicNavbar />
            <main class="max-w-5xl mx-auto grid md:grid-cols-2 gap-10 p-8">
                <div class="space-y-3">
                    <h1 class="text-3xl font-bold">"Entre em contato"</h1>
                    <p>"📧 " {CONTACT_EMAIL}</p>
                    <p>"📞 " {CONTACT_PHONE}</p>
                    <p>"📍 São Paulo - SP"</p>
                </div>
                <form class="card bg-base-200 shadow-md" on:submit=on_submit>
                    <div class="card-body space-y-2">
                        {move || success.get().map(|msg| view! {
                            <div role="status" class="alert alert-success text-sm py-2"><span>{msg}</span></div>
                        })}
                        <input
                            class="input input-bordered"
                            placeholder="Seu nome"
                            required
                            prop:value=nome
                            on:input=move |ev| nome.set(event_target_value(&ev))
                        />
                        <input
                            class="input input-bordered"
                            type="email"
                            placeholder="Seu email"
                            required
                            prop:value=email
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <textarea
                            class="textarea textarea-bordered h-32"
                            placeholder="Sua mensagem"
                            required
                            prop:value=mensagem
                            on:input=move |ev| mensagem.set(event_target_value(&ev))
                        ></textarea>
                        <button class="btn btn-primary" disabled=move || loading.get()>
                            {move || if loading.get() { "Enviando..." } else { "Enviar" }}
                        </button>
                    </div>
                </form>
            </main>
        </div>
    }
}
