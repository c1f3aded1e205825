use crate::pages::landing::PublicNavbar;
use crate::web::router::Link;
use leptos::prelude::*;
use synergia_shared::{AppRoute, ShowcaseSite};

struct SiteCopy {
    title: &'static str,
    image: &'static str,
    image_alt: &'static str,
    description: &'static [&'static str],
    help_title: &'static str,
    help: &'static [&'static str],
    closing: &'static str,
}

fn copy(site: ShowcaseSite) -> SiteCopy {
    match site {
        ShowcaseSite::Guaruja => SiteCopy {
            title: "Local: Guarujá",
            image: "https://cj.estrategia.com/portal/wp-content/uploads/2025/01/11193245/173601144167796eb18406f_1736011441_3x2_md.jpg",
            image_alt: "Poluição nas praias do Guarujá",
            description: &[
                "A poluição nas praias do Guarujá é resultado direto do despejo de esgoto doméstico \
                 e de resíduos urbanos sem tratamento adequado. Em várias regiões da cidade, canais e \
                 tubulações levam água suja até a faixa de areia, formando manchas escuras e \
                 contaminando o mar.",
                "Quando o esgoto é lançado no mar, ele carrega grandes quantidades de bactérias e \
                 matéria orgânica, tornando a água imprópria para o banho e perigosa para a saúde \
                 pública. Muitas análises apontam índices altíssimos de coliformes fecais, indicando a \
                 presença de dejetos humanos.",
                "O impacto ambiental também é grave: a poluição altera o equilíbrio do ecossistema \
                 marinho, afeta peixes, aves e outros animais que dependem da água limpa para \
                 sobreviver. Além disso, o mau cheiro e o acúmulo de resíduos sólidos nas margens de \
                 canais agravam a degradação do ambiente costeiro.",
            ],
            help_title: "Como podemos ajudar?",
            help: &[
                "A Synergia pode desempenhar um papel essencial na limpeza e recuperação das áreas \
                 poluídas do Guarujá, especialmente nos pontos onde o esgoto e o lixo urbano chegam \
                 até a areia e o mar.",
                "O primeiro passo é organizar mutirões de limpeza comunitária, reunindo voluntários, \
                 moradores e parceiros locais, com ações regulares nas praias e margens de canais, \
                 onde o acúmulo de resíduos é mais frequente.",
                "Ao mesmo tempo, campanhas de educação ambiental ajudam a conscientizar a população \
                 sobre o descarte correto do lixo e a importância do saneamento básico.",
            ],
            closing: "Cuidar do Guarujá é cuidar da vida; cada gesto de limpeza se transforma em um \
                      passo para um futuro mais azul e mais verde.",
        },
        ShowcaseSite::Cipo => SiteCopy {
            title: "Local: Cipó-Guaçu",
            image: "https://s2-g1.glbimg.com/HvepQASG4sw0nB2YpSgzCC6kU38=/0x0:993x584/984x0/smart/filters:strip_icc()/i.s3.glbimg.com/v1/AUTH_59edd422c0c84a879bd37670ae4f538a/internal_photos/bs/2022/H/7/3aWY0bRHWuLVlhNQvnsQ/mortandade-peixes.jpg",
            image_alt: "Mortandade de peixes no Rio Cipó",
            description: &[
                "Cipó-Guaçu é um distrito fundamental na Área de Proteção aos Mananciais, \
                 contribuindo diretamente para a bacia do Rio Embu-Guaçu, um dos principais \
                 afluentes da Represa de Guarapiranga.",
                "Apesar de sua importância ambiental, a região sofre com o avanço da ocupação urbana \
                 desordenada, que compromete os recursos hídricos.",
                "O maior problema é a falta de saneamento básico adequado. Sem rede de coleta e \
                 tratamento, o esgoto doméstico é lançado diretamente em córregos como o Rio Cipó, \
                 aumentando os coliformes e ameaçando a qualidade da água que abastece milhões de \
                 pessoas em São Paulo.",
                "Outro fator grave é o descarte irregular de lixo nas margens, além do desmatamento \
                 em Áreas de Preservação Permanente, afetando todo o ecossistema local.",
            ],
            help_title: "Como podemos ajudar em Cipó-Guaçu?",
            help: &[
                "A Synergia pode atuar em duas frentes principais: limpeza de margens e educação \
                 ambiental.",
                "Mutirões nas margens do Rio Cipó ajudam a remover resíduos sólidos, reduzindo a \
                 poluição difusa e preservando os mananciais.",
                "Além disso, ações educativas com moradores e escolas são essenciais para combater o \
                 descarte irregular e conscientizar sobre a importância do saneamento básico.",
            ],
            closing: "Proteger Cipó-Guaçu é garantir água limpa para hoje e para o futuro.",
        },
        ShowcaseSite::Tiete => SiteCopy {
            title: "Local: Rio Tietê",
            image: "https://s2.static.brasilescola.uol.com.br/be/2020/07/poluicao-rio-tiete.jpg",
            image_alt: "Poluição no Rio Tietê",
            description: &[
                "O Rio Tietê é o principal curso d'água do estado de São Paulo, mas, ao passar pela \
                 Região Metropolitana, transforma-se em um dos rios mais poluídos do país, resultado \
                 da expansão urbana e industrial desordenada que usou o rio como canal de dejetos.",
                "A maior fonte de poluição é o esgoto doméstico sem tratamento, lançado diretamente \
                 no leito, o que causa a mancha de poluição que se estende por mais de 200 km. Esse \
                 despejo eleva os níveis de coliformes fecais e diminui o oxigênio dissolvido, \
                 criando trechos onde a vida aquática não existe.",
                "Além do esgoto residencial, o Tietê recebe resíduos industriais com contaminantes \
                 químicos e metais pesados. A poluição difusa, formada por lixo, óleos e detritos \
                 trazidos das ruas e da Marginal Tietê, agrava as enchentes e a degradação da região.",
            ],
            help_title: "Como podemos ajudar na recuperação do Rio Tietê?",
            help: &[
                "A recuperação do Tietê exige ações estruturais e mobilização social. A Synergia \
                 pode focar na limpeza de afluentes e margens e na fiscalização comunitária contra o \
                 despejo irregular de resíduos.",
                "Uma prioridade é organizar mutirões nos córregos e canais laterais que deságuam no \
                 Tietê, porta de entrada do lixo no rio, junto com campanhas de educação ambiental \
                 sobre ligações clandestinas de esgoto e descarte incorreto de resíduos.",
            ],
            closing: "Proteger o Rio Tietê é garantir um futuro melhor para as pessoas e para o meio \
                      ambiente.",
        },
    }
}

fn paragraphs(texts: &'static [&'static str]) -> impl IntoView {
    texts.iter().map(|text| view! { <p>{*text}</p> }).collect_view()
}

/// Public description of a site the NGO works on.
#[component]
pub fn ShowcasePage(site: ShowcaseSite) -> impl IntoView {
    let copy = copy(site);

    view! {
        <div class="min-h-screen bg-base-100">
            <PublicNavbar />

            <main class="max-w-4xl mx-auto p-6 space-y-8">
                <h1 class="text-4xl font-bold text-primary">{copy.title}</h1>

                <figure class="rounded-box overflow-hidden shadow">
                    <img src=copy.image alt=copy.image_alt class="w-full max-h-[28rem] object-cover" />
                </figure>

                <section class="space-y-4 leading-relaxed">{paragraphs(copy.description)}</section>

                <section class="card bg-base-200">
                    <div class="card-body space-y-3">
                        <h2 class="card-title">{copy.help_title}</h2>
                        {paragraphs(copy.help)}
                    </div>
                </section>

                <p class="text-center text-lg italic">{copy.closing}</p>

                <div class="flex justify-center gap-3">
                    <Link to=AppRoute::Register.to_path() class="btn btn-primary">"Seja voluntário"</Link>
                    <Link to=AppRoute::Landing.to_path() class="btn btn-ghost">"Voltar ao início"</Link>
                </div>
            </main>
        </div>
    }
}

/// Links to every showcase page, for the landing page.
#[component]
pub fn ShowcaseLinks() -> impl IntoView {
    view! {
        <div class="grid gap-4 md:grid-cols-3">
            {ShowcaseSite::ALL
                .into_iter()
                .map(|site| {
                    let copy = copy(site);
                    view! {
                        <Link to=AppRoute::Showcase(site).to_path() class="card bg-base-100 shadow hover:shadow-lg">
                            <figure class="h-40 overflow-hidden">
                                <img src=copy.image alt=copy.image_alt class="w-full object-cover" />
                            </figure>
                            <div class="card-body">
                                <h3 class="card-title">{copy.title}</h3>
                            </div>
                        </Link>
                    }
                })
                .collect_view()}
        </div>
    }
}
