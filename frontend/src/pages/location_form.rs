//! Location create / edit page
//!
//! One form for both routes. Field values live in [`LocationFormState`]
//! signals and are turned into the shared [`LocationForm`] on submit.

use crate::auth::use_auth;
use crate::components::error_banner::{ErrorBanner, LoadingSpinner};
use crate::components::form_field::FormField;
use crate::web::router::{Link, use_router};
use crate::web::{picked_file, read_upload};
use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;
use synergia_shared::date::{now, to_datetime_local};
use synergia_shared::forms::{FormStatus, submit_location};
use synergia_shared::validation::{LocationForm, set_tool_quantity, toggle_tool};
use synergia_shared::{AppRoute, Id, ImageUpload, Location, LocationToolPayload, Tool};

#[derive(Clone, Copy)]
struct LocationFormState {
    nome: RwSignal<String>,
    descricao: RwSignal<String>,
    imagem_url: RwSignal<String>,
    endereco: RwSignal<String>,
    rua: RwSignal<String>,
    numero: RwSignal<String>,
    cep: RwSignal<String>,
    data_inicio: RwSignal<String>,
    data_final: RwSignal<String>,
    ferramentas: RwSignal<Vec<LocationToolPayload>>,
    image: RwSignal<Option<ImageUpload>>,
}

impl LocationFormState {
    fn new() -> Self {
        Self {
            nome: RwSignal::new(String::new()),
            descricao: RwSignal::new(String::new()),
            imagem_url: RwSignal::new(String::new()),
            endereco: RwSignal::new(String::new()),
            rua: RwSignal::new(String::new()),
            numero: RwSignal::new(String::new()),
            cep: RwSignal::new(String::new()),
            data_inicio: RwSignal::new(String::new()),
            data_final: RwSignal::new(String::new()),
            ferramentas: RwSignal::new(Vec::new()),
            image: RwSignal::new(None),
        }
    }

    /// Pre-fills the form with a stored location; dates go back to input format.
    fn load(&self, location: &Location) {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let input_date = |v: &Option<String>| {
            v.as_deref()
                .and_then(|d| to_datetime_local(d, &Local))
                .unwrap_or_default()
        };
        self.nome.set(location.nome.clone());
        self.descricao.set(text(&location.descricao));
        self.imagem_url.set(text(&location.imagem_url));
        self.endereco.set(text(&location.endereco));
        self.rua.set(text(&location.rua));
        self.numero.set(text(&location.numero));
        self.cep.set(text(&location.cep));
        self.data_inicio.set(input_date(&location.data_inicio));
        self.data_final.set(input_date(&location.data_final));
        self.ferramentas.set(
            location
                .ferramentas
                .iter()
                .filter_map(|f| {
                    f.ferramenta_id.map(|ferramenta_id| LocationToolPayload {
                        ferramenta_id,
                        quantidade: f.quantidade,
                    })
                })
                .collect(),
        );
    }

    fn to_form(&self) -> LocationForm {
        LocationForm {
            nome: self.nome.get_untracked(),
            descricao: self.descricao.get_untracked(),
            imagem_url: self.imagem_url.get_untracked(),
            has_image_file: self.image.with_untracked(Option::is_some),
            endereco: self.endereco.get_untracked(),
            rua: self.rua.get_untracked(),
            numero: self.numero.get_untracked(),
            cep: self.cep.get_untracked(),
            data_inicio: self.data_inicio.get_untracked(),
            data_final: self.data_final.get_untracked(),
            ferramentas: self.ferramentas.get_untracked(),
        }
    }
}

#[component]
fn ToolPicker(tools: ReadSignal<Vec<Tool>>, state: LocationFormState) -> impl IntoView {
    let rows = move || {
        tools
            .get()
            .into_iter()
            .filter_map(|tool| tool.id.map(|id| (id, tool)))
            .map(|(id, tool)| {
                let selected = move || state.ferramentas.with(|l| l.iter().any(|f| f.ferramenta_id == id));
                let quantity = move || {
                    state
                        .ferramentas
                        .with(|l| l.iter().find(|f| f.ferramenta_id == id).map(|f| f.quantidade))
                        .unwrap_or(1)
                };
                view! {
                    <div class="flex items-center gap-3 py-1">
                        <input
                            type="checkbox"
                            class="checkbox checkbox-primary"
                            prop:checked=selected
                            on:change=move |_| state.ferramentas.update(|l| toggle_tool(l, id))
                        />
                        <span class="flex-1">{tool.nome.clone()}</span>
                        <span class="text-xs text-base-content/60">
                            {format!("{} disponíveis", tool.quantidade_disponivel)}
                        </span>
                        <input
                            type="number"
                            min="1"
                            class="input input-bordered input-sm w-20"
                            disabled=move || !selected()
                            prop:value=move || quantity().to_string()
                            on:input=move |ev| {
                                if let Ok(q) = event_target_value(&ev).parse::<u32>() {
                                    state.ferramentas.update(|l| set_tool_quantity(l, id, q.max(1)));
                                }
                            }
                        />
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <div class="form-control">
            <span class="label-text font-semibold mb-2">"Ferramentas necessárias"</span>
            <div class="bg-base-200 rounded-lg p-3 max-h-64 overflow-y-auto">{rows}</div>
        </div>
    }
}

#[component]
pub fn LocationFormPage(#[prop(optional)] editing: Option<Id>) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let state = LocationFormState::new();
    let status = RwSignal::new(FormStatus::Idle);
    let (tools, set_tools) = signal(Vec::<Tool>::new());
    let (loading, set_loading) = signal(editing.is_some());
    let (load_error, set_load_error) = signal(Option::<String>::None);

    spawn_local(async move {
        let api = auth.api();
        match api.list_tools().await {
            Ok(list) => set_tools.set(list),
            Err(e) => tracing::warn!("tool list unavailable: {}", e),
        }
        if let Some(id) = editing {
            match api.get_location(id).await {
                Ok(location) => state.load(&location),
                Err(e) => set_load_error.set(Some(e.user_message())),
            }
            set_loading.set(false);
        }
    });

    let on_file = move |ev: web_sys::Event| {
        let Some(file) = picked_file(&ev) else {
            state.image.set(None);
            return;
        };
        spawn_local(async move {
            state.image.set(read_upload(file).await);
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if status.get_untracked().is_submitting() {
            return;
        }
        let form = state.to_form();
        let image = state.image.get_untracked();
        status.set(FormStatus::Submitting);

        spawn_local(async move {
            let api = auth.api();
            match submit_location(&api, &form, image.as_ref(), editing, now(), &Local).await {
                Ok(saved) => {
                    status.set(FormStatus::Success("Local salvo com sucesso!".to_string()));
                    let target = saved
                        .id
                        .or(editing)
                        .map_or(AppRoute::Locations, AppRoute::LocationDetail);
                    router.navigate_to(target);
                }
                Err(e) => status.set(FormStatus::Error(e)),
            }
        });
    };

    let error = Signal::derive(move || {
        load_error
            .get()
            .or_else(|| status.with(FormStatus::error_message))
    });
    let field_error = move |key: &'static str| move || status.with(|s| s.field_error(key));
    let title = if editing.is_some() { "Editar local" } else { "Novo local" };
    let back = editing.map_or(AppRoute::Locations, AppRoute::LocationDetail).to_path();

    view! {
        <div class="max-w-3xl mx-auto">
            <h1 class="text-3xl font-bold mb-6">{title}</h1>
            <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner /> }>
                <form class="card bg-base-100 shadow" on:submit=on_submit>
                    <div class="card-body space-y-2">
                        <ErrorBanner message=error />

                        <FormField id="nome" label="Nome do local" value=state.nome status=status error_key="nome" />
                        <div class="form-control">
                            <label class="label" for="descricao"><span class="label-text">"Descrição"</span></label>
                            <textarea
                                id="descricao"
                                class="textarea textarea-bordered h-28"
                                prop:value=state.descricao
                                on:input=move |ev| state.descricao.set(event_target_value(&ev))
                            ></textarea>
                            {move || field_error("descricao")().map(|m| view! { <span class="text-error text-xs">{m}</span> })}
                        </div>

                        <div class="grid md:grid-cols-2 gap-4">
                            <div class="form-control">
                                <label class="label" for="imagem"><span class="label-text">"Imagem (arquivo)"</span></label>
                                <input id="imagem" type="file" accept="image/*" class="file-input file-input-bordered" on:change=on_file />
                            </div>
                            <FormField id="imagem_url" label="ou URL da imagem" value=state.imagem_url status=status error_key="imagemUrl" />
                        </div>
                        {move || field_error("imagem")().map(|m| view! { <span class="text-error text-xs">{m}</span> })}

                        <FormField id="endereco" label="Endereço (referência)" value=state.endereco status=status error_key="endereco" />
                        <div class="grid md:grid-cols-3 gap-4">
                            <FormField id="rua" label="Rua" value=state.rua status=status error_key="rua" />
                            <FormField id="numero" label="Número" value=state.numero status=status error_key="numero" />
                            <FormField id="cep" label="CEP" value=state.cep status=status error_key="cep" />
                        </div>
                        <div class="grid md:grid-cols-2 gap-4">
                            <FormField id="data_inicio" label="Início" kind="datetime-local" value=state.data_inicio status=status error_key="dataInicio" />
                            <FormField id="data_final" label="Término (opcional)" kind="datetime-local" value=state.data_final status=status error_key="dataFinal" />
                        </div>

                        <ToolPicker tools=tools state=state />
                        {move || field_error("ferramentas")().map(|m| view! { <span class="text-error text-xs">{m}</span> })}

                        <div class="card-actions justify-end mt-4">
                            <Link to=back.clone() class="btn btn-ghost">"Cancelar"</Link>
                            <button type="submit" class="btn btn-primary" disabled=move || status.with(FormStatus::is_submitting)>
                                {move || if status.with(FormStatus::is_submitting) {
                                    view! { <span class="loading loading-spinner"></span> "Salvando..." }.into_any()
                                } else {
                                    "Salvar".into_any()
                                }}
                            </button>
                        </div>
                    </div>
                </form>
            </Show>
        </div>
    }
}
