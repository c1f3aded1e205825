use crate::auth::use_auth;
use crate::components::error_banner::{ErrorBanner, LoadingSpinner, Notification};
use crate::web::confirm;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use synergia_shared::date::format_br_datetime;
use synergia_shared::{AppRoute, Application, ApplicationStatus, Id};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Confirm,
    Refuse,
    Delete,
}

#[component]
pub fn ApplicationDetailPage(id: Id) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (application, set_application) = signal(Option::<Application>::None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (busy, set_busy) = signal(Option::<Action>::None);
    let (refusing, set_refusing) = signal(false);
    let reason = RwSignal::new(String::new());
    let notification = RwSignal::new(Option::<(String, bool)>::None);

    spawn_local(async move {
        match auth.api().get_application(id).await {
            Ok(a) => set_application.set(Some(a)),
            Err(e) => set_error.set(Some(e.user_message())),
        }
        set_loading.set(false);
    });

    // The backend may answer a status change with an empty body.
    let apply_status = move |answer: Option<Application>, status: ApplicationStatus| {
        match answer {
            Some(updated) => set_application.set(Some(updated)),
            None => set_application.update(|a| {
                if let Some(a) = a {
                    a.status = status;
                }
            }),
        }
    };

    let on_confirm = move |_| {
        set_busy.set(Some(Action::Confirm));
        spawn_local(async move {
            match auth.api().confirm_application(id).await {
                Ok(answer) => {
                    apply_status(answer, ApplicationStatus::Confirmed);
                    notification.set(Some(("Inscrição aprovada".to_string(), false)));
                }
                Err(e) => notification.set(Some((e.user_message(), true))),
            }
            set_busy.set(None);
        });
    };

    let on_refuse = move |_| {
        let motivo = reason.get_untracked();
        set_busy.set(Some(Action::Refuse));
        spawn_local(async move {
            match auth.api().refuse_application(id, Some(&motivo)).await {
                Ok(answer) => {
                    apply_status(answer, ApplicationStatus::Refused);
                    set_refusing.set(false);
                    reason.set(String::new());
                    notification.set(Some(("Inscrição recusada".to_string(), false)));
                }
                Err(e) => notification.set(Some((e.user_message(), true))),
            }
            set_busy.set(None);
        });
    };

    let on_delete = move |_| {
        if !confirm("Excluir esta inscrição?") {
            return;
        }
        set_busy.set(Some(Action::Delete));
        spawn_local(async move {
            match auth.api().delete_application(id).await {
                Ok(()) => router.navigate_to(AppRoute::Applications),
                Err(e) => {
                    notification.set(Some((e.user_message(), true)));
                    set_busy.set(None);
                }
            }
        });
    };

    let is_busy = move || busy.get().is_some();
    let pending = move || {
        application.with(|a| a.as_ref().is_some_and(|a| a.status == ApplicationStatus::Pending))
    };

    let details = move || {
        application.get().map(|a| {
            let status = a.status;
            view! {
                <div class="card bg-base-100 shadow">
                    <div class="card-body space-y-2">
                        <div class="flex items-center justify-between">
                            <h1 class="card-title text-2xl">{format!("Inscrição #{}", id)}</h1>
                            <span class=status.badge_class()>{status.label()}</span>
                        </div>
                        <div class="flex items-center gap-4">
                            {a.usuario_foto.clone().filter(|f| !f.is_empty()).map(|src| view! {
                                <div class="avatar"><div class="w-16 rounded-full"><img src=src alt="Foto" /></div></div>
                            })}
                            <div>
                                <p class="font-semibold text-lg">{a.usuario_nome.clone().unwrap_or_else(|| "Voluntário".to_string())}</p>
                                {a.usuario_email.clone().map(|e| view! { <p class="text-sm">{e}</p> })}
                                {a.usuario_telefone.clone().map(|t| view! { <p class="text-sm">{t}</p> })}
                                {a.usuario_idade.map(|i| view! { <p class="text-sm">{format!("{} anos", i)}</p> })}
                            </div>
                        </div>
                        <div class="divider"></div>
                        <p>
                            <strong>"Local: "</strong>
                            {match a.local_id {
                                Some(local) => view! {
                                    <Link to=AppRoute::LocationDetail(local).to_path() class="link link-primary">
                                        {a.local_nome.clone().unwrap_or_else(|| format!("Local #{}", local))}
                                    </Link>
                                }.into_any(),
                                None => a.local_nome.clone().unwrap_or_default().into_any(),
                            }}
                        </p>
                        {a.data_desejada.as_deref().map(|d| view! { <p><strong>"Data desejada: "</strong>{format_br_datetime(d)}</p> })}
                        {a.observacao.clone().map(|o| view! { <p><strong>"Observação: "</strong>{o}</p> })}
                        {a.motivo.clone().map(|m| view! { <p class="text-error"><strong>"Motivo da recusa: "</strong>{m}</p> })}
                    </div>
                </div>
            }
        })
    };

    view! {
        <div class="max-w-3xl mx-auto space-y-6">
            <Notification notification=notification />
            <ErrorBanner message=error />
            <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner /> }>
                {details}
                <Show when=move || application.with(Option::is_some)>
                    <div class="flex flex-wrap gap-2">
                        <Show when=pending>
                            <button class="btn btn-success" disabled=is_busy on:click=on_confirm>
                                {move || if busy.get() == Some(Action::Confirm) { "Aprovando..." } else { "Aprovar" }}
                            </button>
                            <button class="btn btn-warning" disabled=is_busy on:click=move |_| set_refusing.update(|r| *r = !*r)>
                                "Recusar"
                            </button>
                        </Show>
                        <button class="btn btn-error btn-outline" disabled=is_busy on:click=on_delete>
                            {move || if busy.get() == Some(Action::Delete) { "Excluindo..." } else { "Excluir" }}
                        </button>
                        <Link to=AppRoute::Applications.to_path() class="btn btn-ghost">"Voltar"</Link>
                    </div>
                    <Show when=move || refusing.get()>
                        <div class="card bg-base-200">
                            <div class="card-body space-y-2">
                                <label class="label" for="motivo"><span class="label-text">"Motivo da recusa (opcional)"</span></label>
                                <textarea
                                    id="motivo"
                                    class="textarea textarea-bordered"
                                    prop:value=reason
                                    on:input=move |ev| reason.set(event_target_value(&ev))
                                ></textarea>
                                <button class="btn btn-warning self-end" disabled=is_busy on:click=on_refuse>
                                    {move || if busy.get() == Some(Action::Refuse) { "Recusando..." } else { "Confirmar recusa" }}
                                </button>
                            </div>
                        </div>
                    </Show>
                </Show>
            </Show>
        </div>
    }
}
