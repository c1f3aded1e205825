use super::*;
use crate::http::{MockHttpClient, RequestBody};
use crate::models::{ApplicationStatus, ToolPayload};
use crate::storage::MemoryStorage;
use serde_json::json;

const BASE: &str = "http://localhost:8080/api";

fn client() -> (Arc<MemoryStorage>, ApiClient<MockHttpClient>) {
    let storage = Arc::new(MemoryStorage::new());
    let api = ApiClient::new(&AppConfig::default(), MockHttpClient::new(), storage.clone());
    (storage, api)
}

fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

// =========================================================
// Transport concerns
// =========================================================

#[tokio::test]
async fn test_no_token_no_header() {
    let (_storage, api) = client();
    api.http()
        .mock_response(HttpMethod::Get, &url("/locais"), 200, json!([]));

    api.list_locations().await.unwrap();
    let sent = api.http().last_request().unwrap();
    assert!(!sent.headers.contains_key(HEADER_AUTHORIZATION));
    assert_eq!(sent.timeout_ms, Some(10_000));
}

#[tokio::test]
async fn test_token_falls_back_to_mirror_key() {
    let (storage, api) = client();
    storage
        .set(STORAGE_USER_KEY, &json!({ "id": 1, "nomeCompleto": "Ana" }).to_string())
        .unwrap();
    storage.set(STORAGE_TOKEN_KEY, "mirror-token").unwrap();
    api.http()
        .mock_response(HttpMethod::Get, &url("/ferramentas"), 200, json!([]));

    api.list_tools().await.unwrap();
    let sent = api.http().last_request().unwrap();
    assert_eq!(
        sent.headers.get(HEADER_AUTHORIZATION).map(String::as_str),
        Some("Bearer mirror-token")
    );
}

#[tokio::test]
async fn test_user_token_aliases() {
    let (storage, api) = client();
    storage
        .set(STORAGE_USER_KEY, &json!({ "id": 1, "accessToken": "acc" }).to_string())
        .unwrap();
    storage.set(STORAGE_TOKEN_KEY, "stale").unwrap();
    api.http()
        .mock_response(HttpMethod::Get, &url("/inscricoes"), 200, json!([]));

    api.list_applications().await.unwrap();
    let sent = api.http().last_request().unwrap();
    assert_eq!(
        sent.headers.get(HEADER_AUTHORIZATION).map(String::as_str),
        Some("Bearer acc")
    );
}

#[tokio::test]
async fn test_non_success_parses_envelope() {
    let (_storage, api) = client();
    api.http().mock_response(
        HttpMethod::Get,
        &url("/locais/99"),
        404,
        json!({ "message": "Local não encontrado" }),
    );

    let err = api.get_location(99).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Server {
            status: 404,
            envelope: ErrorEnvelope::ServerMessage("Local não encontrado".into())
        }
    );
}

#[tokio::test]
async fn test_network_failure_is_propagated() {
    let (_storage, api) = client();
    api.http().mock_failure(
        HttpMethod::Get,
        &url("/ferramentas/disponiveis"),
        ApiError::Timeout(10_000),
    );

    let err = api.list_available_tools().await.unwrap_err();
    assert_eq!(err, ApiError::Timeout(10_000));
    assert!(matches!(err.envelope(), ErrorEnvelope::Network(_)));
}

#[tokio::test]
async fn test_empty_list_body() {
    let (_storage, api) = client();
    api.http()
        .mock_raw(HttpMethod::Get, &url("/admin/locais/pendentes"), 200, "");

    assert!(api.pending_locations().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_bad_payload_is_decode_error() {
    let (_storage, api) = client();
    api.http()
        .mock_response(HttpMethod::Get, &url("/ferramentas/3"), 200, json!("erro"));

    assert!(matches!(
        api.get_tool(3).await.unwrap_err(),
        ApiError::Decode(DecodeError::Json(_))
    ));
}

#[tokio::test]
async fn test_null_location_name_keeps_the_list() {
    let (_storage, api) = client();
    api.http().mock_response(
        HttpMethod::Get,
        &url("/locais"),
        200,
        json!([
            { "id": 1, "nome": "Tietê" },
            { "id": 2, "nome": null, "numero": 120, "ferramentas": null }
        ]),
    );

    let locations = api.list_locations().await.unwrap();
    assert_eq!(locations.len(), 2);
    assert_eq!(locations[0].nome, "Tietê");
    assert_eq!(locations[1].nome, "");
    assert_eq!(locations[1].numero.as_deref(), Some("120"));
    assert!(locations[1].ferramentas.is_empty());
}

#[tokio::test]
async fn test_odd_tool_counters_keep_the_list() {
    let (_storage, api) = client();
    api.http().mock_response(
        HttpMethod::Get,
        &url("/ferramentas"),
        200,
        json!([
            { "id": 1, "nome": "Pá", "quantidade": 4, "quantidadeDisponivel": null },
            { "id": "2", "nome": "Luvas", "quantidade": "10", "quantidadeDisponivel": 3 }
        ]),
    );

    let tools = api.list_tools().await.unwrap();
    assert_eq!(tools.len(), 2);
    assert_eq!(tools[0].quantidade, 4);
    assert_eq!(tools[0].quantidade_disponivel, 0);
    assert!(!tools[0].is_available());
    assert_eq!(tools[1].id, Some(2));
    assert_eq!(tools[1].quantidade, 10);
}

#[tokio::test]
async fn test_location_tool_quantity_defaults_to_one() {
    let (_storage, api) = client();
    api.http().mock_response(
        HttpMethod::Get,
        &url("/locais/5"),
        200,
        json!({
            "id": 5,
            "nome": "Cipó",
            "ferramentas": [
                { "ferramentaId": 1, "quantidade": null },
                { "ferramentaId": 2 },
                { "ferramentaId": 3, "quantidade": 6 }
            ]
        }),
    );

    let location = api.get_location(5).await.unwrap();
    let quantities: Vec<u32> = location.ferramentas.iter().map(|f| f.quantidade).collect();
    assert_eq!(quantities, vec![1, 1, 6]);
}

#[tokio::test]
async fn test_unknown_application_status_is_pending() {
    let (_storage, api) = client();
    api.http().mock_response(
        HttpMethod::Get,
        &url("/inscricoes"),
        200,
        json!([{ "id": 1, "status": "EM_ANALISE", "usuarioIdade": "22" }]),
    );

    let applications = api.list_applications().await.unwrap();
    assert_eq!(applications[0].status, ApplicationStatus::Pending);
    assert_eq!(applications[0].usuario_idade, Some(22));
}

// =========================================================
// Endpoints
// =========================================================

#[tokio::test]
async fn test_date_queries_are_encoded() {
    let (_storage, api) = client();
    let date = "2030-01-10T12:00:00.000Z";
    api.http().mock_response(
        HttpMethod::Get,
        &url("/locais/disponiveis?data=2030-01-10T12%3A00%3A00.000Z"),
        200,
        json!([{ "id": 1, "nome": "Cipó" }]),
    );

    let available = api.list_locations_available_on(date).await.unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].nome, "Cipó");
}

#[tokio::test]
async fn test_application_status_routes() {
    let (_storage, api) = client();
    api.http().mock_response(
        HttpMethod::Get,
        &url("/inscricoes/status/RECUSADA"),
        200,
        json!([{ "id": 2, "status": "RECUSADA", "motivo": "lotado" }]),
    );

    let refused = api
        .list_applications_by_status(ApplicationStatus::Refused)
        .await
        .unwrap();
    assert_eq!(refused[0].motivo.as_deref(), Some("lotado"));
}

#[tokio::test]
async fn test_confirm_and_refuse() {
    let (_storage, api) = client();
    api.http()
        .mock_raw(HttpMethod::Put, &url("/inscricoes/4/confirmar"), 204, "");
    api.http().mock_response(
        HttpMethod::Put,
        &url("/inscricoes/4/recusar"),
        200,
        json!({ "id": 4, "status": "RECUSADA" }),
    );

    assert_eq!(api.confirm_application(4).await.unwrap(), None);

    let refused = api
        .refuse_application(4, Some("  sem vagas "))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(refused.status, ApplicationStatus::Refused);
    let sent = api.http().last_request().unwrap();
    assert_eq!(sent.body, RequestBody::Json("{\"motivo\":\"sem vagas\"}".into()));

    api.refuse_application(4, Some("   ")).await.unwrap();
    let sent = api.http().last_request().unwrap();
    assert_eq!(sent.body, RequestBody::Json("{}".into()));
}

#[tokio::test]
async fn test_profile_shapes() {
    let (_storage, api) = client();
    api.http().mock_response(
        HttpMethod::Get,
        &url("/meu-perfil/1"),
        200,
        json!({
            "usuario": { "id": 1, "nome_completo": "Ana" },
            "inscricoes": [{ "id": 9, "local_nome": "Tietê", "status": "PENDENTE" }]
        }),
    );
    api.http().mock_response(
        HttpMethod::Get,
        &url("/meu-perfil/2"),
        200,
        json!({ "id": 2, "nome_completo": "Bruno" }),
    );

    let full = api.get_profile(1).await.unwrap();
    assert_eq!(full.usuario.nome_completo.as_deref(), Some("Ana"));
    assert_eq!(full.inscricoes[0].local_nome.as_deref(), Some("Tietê"));

    let bare = api.get_profile(2).await.unwrap();
    assert_eq!(bare.usuario.id, Some(2));
    assert!(bare.inscricoes.is_empty());
}

#[tokio::test]
async fn test_users_are_normalized() {
    let (_storage, api) = client();
    api.http().mock_response(
        HttpMethod::Get,
        &url("/usuarios"),
        200,
        json!([{ "id": 1, "nome_completo": "Ana", "foto_perfil": "a.png" }]),
    );

    let users = api.list_users().await.unwrap();
    assert_eq!(users[0].foto_perfil.as_deref(), Some("a.png"));
}

#[tokio::test]
async fn test_tool_update_and_delete() {
    let (_storage, api) = client();
    api.http().mock_response(
        HttpMethod::Put,
        &url("/ferramentas/3"),
        200,
        json!({ "id": 3, "nome": "Rastelo", "quantidade": 5, "quantidadeDisponivel": 2 }),
    );
    api.http()
        .mock_raw(HttpMethod::Delete, &url("/ferramentas/3"), 204, "");

    let payload = ToolPayload {
        nome: "Rastelo".into(),
        descricao: "Rastelo de metal".into(),
        imagem_url: None,
        quantidade: 5,
        quantidade_disponivel: Some(2),
    };
    let tool = api.update_tool(3, &payload).await.unwrap();
    assert!(tool.is_available());
    api.delete_tool(3).await.unwrap();
    assert_eq!(api.http().request_count(), 2);
}

#[tokio::test]
async fn test_admin_endpoints() {
    let (_storage, api) = client();
    api.http().mock_response(
        HttpMethod::Get,
        &url("/admin/dashboard/estatisticas"),
        200,
        json!({ "totalUsuarios": 12, "inscricoesPendentes": 3 }),
    );
    api.http()
        .mock_raw(HttpMethod::Put, &url("/admin/locais/8/aprovar"), 200, "");
    api.http().mock_response(
        HttpMethod::Get,
        &url("/admin/relatorios/inscricoes?dataInicio=2030-01-01&dataFim=2030-01-31"),
        200,
        json!({ "total": 4 }),
    );

    let stats = api.dashboard_statistics().await.unwrap();
    assert_eq!(stats.total_usuarios, 12);
    assert_eq!(stats.inscricoes_pendentes, 3);
    assert_eq!(stats.total_locais, 0);

    api.approve_location(8).await.unwrap();

    let report = api
        .applications_report(&ApplicationReportRange {
            data_inicio: "2030-01-01".into(),
            data_fim: "2030-01-31".into(),
        })
        .await
        .unwrap();
    assert_eq!(report["total"], json!(4));
}
