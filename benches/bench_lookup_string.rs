use criterion::{Criterion, criterion_group, criterion_main};
use spellmend::{SpellCorrector, Verbosity};

const WORDS: &[(&str, u64)] = &[
    ("the", 23135851162),
    ("of", 13151942776),
    ("and", 12997637966),
    ("to", 12136980858),
    ("in", 8469404971),
    ("for", 5933321709),
    ("is", 4705743816),
    ("on", 3750423199),
    ("that", 3400031103),
    ("by", 3350048871),
    ("this", 3228469771),
    ("with", 3183110675),
    ("you", 2996181025),
    ("it", 2813163874),
    ("not", 2633487141),
    ("or", 2590739907),
    ("be", 2398724162),
    ("are", 2393614870),
    ("from", 2275595356),
    ("at", 2272272772),
    ("as", 2247431740),
    ("your", 1620781117),
    ("all", 1424595543),
    ("have", 1262731735),
    ("new", 1634135613),
    ("more", 1416949318),
    ("an", 1369376932),
    ("was", 1129967521),
    ("we", 1176291736),
    ("will", 1140167216),
    ("home", 639711198),
    ("can", 1022775440),
    ("us", 1000730070),
    ("about", 986203232),
    ("if", 933971078),
    ("page", 912323564),
    ("my", 895456936),
    ("has", 878986557),
    ("search", 804212977),
    ("free", 785878931),
    ("but", 781228338),
    ("our", 768783936),
    ("one", 757835014),
    ("other", 643163425),
    ("information", 525636101),
    ("time", 520831659),
    ("they", 516346220),
    ("site", 507769794),
    ("he", 504272880),
    ("members", 117393722),
];

fn build_corrector() -> SpellCorrector {
    let mut corrector = SpellCorrector::new();
    for &(term, count) in WORDS {
        corrector.create_dictionary_entry(term, count);
    }
    corrector
}

fn bench_lookup(c: &mut Criterion) {
    let corrector = build_corrector();
    let queries = ["teh", "abotu", "memebers", "infromation", "serach", "tiem"];

    c.bench_function("lookup_closest", |b| {
        b.iter(|| {
            for query in queries {
                let _ = corrector.lookup(query, Verbosity::Closest, 2);
            }
        })
    });

    c.bench_function("lookup_compound", |b| {
        b.iter(|| {
            let _ = corrector.lookup_compound("abotu teh oter memebers ofthe site", 2);
        })
    });
}

criterion_group!(benches, bench_lookup);
criterion_main!(benches);
