use crate::auth::use_auth;
use crate::components::error_banner::{ErrorBanner, LoadingSpinner, Notification};
use crate::web::confirm;
use crate::web::router::{Link, use_router};
use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use synergia_shared::date::{format_br_datetime, local_input_to_utc, now, to_iso};
use synergia_shared::forms::{FormStatus, submit_application};
use synergia_shared::validation::ApplicationForm;
use synergia_shared::{AppRoute, Id, Location, Tool};

/// `true`/`false`, or an object carrying `disponivel`.
fn availability_flag(value: &Value) -> Option<bool> {
    value
        .as_bool()
        .or_else(|| value.get("disponivel").and_then(Value::as_bool))
}

#[component]
fn ApplyForm(location_id: Id) -> impl IntoView {
    let auth = use_auth();
    let desired = RwSignal::new(String::new());
    let status = RwSignal::new(FormStatus::Idle);
    let (available, set_available) = signal(Option::<bool>::None);

    let on_date = move |ev| {
        let value = event_target_value(&ev);
        desired.set(value.clone());
        set_available.set(None);
        let Some(instant) = local_input_to_utc(&value, &Local) else {
            return;
        };
        spawn_local(async move {
            match auth
                .api()
                .check_location_availability(location_id, &to_iso(&instant))
                .await
            {
                Ok(value) => set_available.set(availability_flag(&value)),
                Err(e) => tracing::debug!("availability check failed: {}", e),
            }
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if status.get_untracked().is_submitting() {
            return;
        }
        let form = ApplicationForm {
            data_desejada: desired.get_untracked(),
        };
        status.set(FormStatus::Submitting);

        spawn_local(async move {
            let session = auth.current_user();
            let api = auth.api();
            match submit_application(&api, &form, session.as_ref(), location_id, now(), &Local).await {
                Ok(_) => {
                    desired.set(String::new());
                    status.set(FormStatus::Success(
                        "Inscrição enviada! Aguarde a confirmação.".to_string(),
                    ));
                }
                Err(e) => status.set(FormStatus::Error(e)),
            }
        });
    };

    let error = Signal::derive(move || status.with(FormStatus::error_message));

    view! {
        <form class="card bg-base-200" on:submit=on_submit>
            <div class="card-body space-y-2">
                <h2 class="card-title">"Quero participar"</h2>
                <ErrorBanner message=error />
                {move || status.with(|s| s.success_message().map(str::to_string)).map(|msg| view! {
                    <div role="status" class="alert alert-success text-sm py-2"><span>{msg}</span></div>
                })}
                <label class="label" for="data-desejada"><span class="label-text">"Data desejada"</span></label>
                <input
                    id="data-desejada"
                    type="datetime-local"
                    class="input input-bordered"
                    prop:value=desired
                    on:change=on_date
                />
                {move || match available.get() {
                    Some(true) => view! { <span class="text-success text-sm">"Local disponível nesta data"</span> }.into_any(),
                    Some(false) => view! { <span class="text-warning text-sm">"Local indisponível nesta data"</span> }.into_any(),
                    None => ().into_any(),
                }}
                <button class="btn btn-primary" disabled=move || status.with(FormStatus::is_submitting)>
                    "Inscrever-se"
                </button>
            </div>
        </form>
    }
}

#[component]
pub fn LocationDetailPage(id: Id) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (location, set_location) = signal(Option::<Location>::None);
    let (tools, set_tools) = signal(Vec::<Tool>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (deleting, set_deleting) = signal(false);
    let notification = RwSignal::new(Option::<(String, bool)>::None);

    spawn_local(async move {
        let api = auth.api();
        let (found, linked) = futures::join!(api.get_location(id), api.list_tools_by_location(id));
        match found {
            Ok(l) => set_location.set(Some(l)),
            Err(e) => set_error.set(Some(e.user_message())),
        }
        match linked {
            Ok(list) => set_tools.set(list),
            Err(e) => tracing::debug!("no tools for location {}: {}", id, e),
        }
        set_loading.set(false);
    });

    let on_delete = move |_| {
        if !confirm("Tem certeza que deseja excluir este local?") {
            return;
        }
        set_deleting.set(true);
        spawn_local(async move {
            match auth.api().delete_location(id).await {
                Ok(()) => router.navigate_to(AppRoute::Locations),
                Err(e) => {
                    notification.set(Some((format!("Erro ao excluir local: {}", e.user_message()), true)));
                    set_deleting.set(false);
                }
            }
        });
    };

    let details = move || {
        location.get().map(|l| {
            let image = l.imagem_url.clone().filter(|u| !u.trim().is_empty());
            let tool_names: Vec<String> = if l.ferramentas.is_empty() {
                tools.get().into_iter().map(|t| t.nome).collect()
            } else {
                l.ferramentas
                    .iter()
                    .map(|f| {
                        let name = f
                            .nome
                            .clone()
                            .or_else(|| f.ferramenta_id.map(|id| format!("Ferramenta #{}", id)))
                            .unwrap_or_default();
                        format!("{} × {}", name, f.quantidade)
                    })
                    .collect()
            };

            view! {
                <div class="card bg-base-100 shadow overflow-hidden">
                    {match image {
                        Some(src) => view! { <img src=src alt=l.nome.clone() class="w-full h-64 object-cover" /> }.into_any(),
                        None => view! {
                            <div class="w-full h-64 flex items-center justify-center bg-base-200">"Sem imagem disponível"</div>
                        }.into_any(),
                    }}
                    <div class="card-body space-y-2">
                        <h1 class="text-2xl font-bold">{l.nome.clone()}</h1>
                        <p>{l.descricao.clone().unwrap_or_else(|| "Sem descrição.".to_string())}</p>
                        {l.address_line().map(|a| view! { <p><strong>"Endereço: "</strong>{a}</p> })}
                        {l.data_inicio.as_deref().map(|d| view! { <p><strong>"Início: "</strong>{format_br_datetime(d)}</p> })}
                        {l.data_final.as_deref().map(|d| view! { <p><strong>"Término: "</strong>{format_br_datetime(d)}</p> })}
                        <Show when={
                            let empty = tool_names.is_empty();
                            move || !empty
                        }>
                            <h3 class="font-semibold mt-2">"Ferramentas"</h3>
                        </Show>
                        <ul class="list-disc list-inside">
                            {tool_names.iter().map(|n| view! { <li>{n.clone()}</li> }).collect_view()}
                        </ul>
                        <div class="card-actions mt-4">
                            <Show when=move || auth.is_admin()>
                                <Link to=AppRoute::LocationEdit(id).to_path() class="btn btn-warning">"Editar"</Link>
                                <button class="btn btn-error" disabled=move || deleting.get() on:click=on_delete>
                                    {move || if deleting.get() { "Excluindo..." } else { "Excluir" }}
                                </button>
                            </Show>
                            <Link to=AppRoute::Locations.to_path() class="btn btn-ghost">"Voltar"</Link>
                        </div>
                    </div>
                </div>
            }
        })
    };

    view! {
        <div class="max-w-4xl mx-auto space-y-6">
            <Notification notification=notification />
            <ErrorBanner message=error />
            <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner /> }>
                <Show
                    when=move || location.with(Option::is_some)
                    fallback=|| view! { <p class="text-center py-12">"Local não encontrado."</p> }
                >
                    {details}
                    <ApplyForm location_id=id />
                </Show>
            </Show>
        </div>
    }
}
