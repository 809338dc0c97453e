//! Benchmarks for SFC block parsing and end-to-end compilation.
//!
//! Run with: cargo bench -p vize_atelier_sfc

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use vize_atelier_sfc::{compile_sfc, parse_sfc, SfcCompileOptions, SfcParseOptions};

const SIMPLE_SFC: &str = r#"<script setup>
const msg = 'hello'
</script>

<template>
  <div>{{ msg }}</div>
</template>
"#;

const PROPS_SFC: &str = r#"<script setup lang="ts">
const { name, count = 0 } = defineProps<{
  name: string
  count?: number
}>()
</script>

<template>
  <div class="card">
    <h2>{{ name }}</h2>
    <p>Count: {{ count }}</p>
  </div>
</template>
"#;

const COMPLEX_SFC: &str = r#"<script setup lang="ts">
import { ref, computed } from 'vue'

const props = defineProps<{
  items: { id: number; label: string }[]
  title?: string
}>()

const emit = defineEmits<{
  (e: 'select', id: number): void
}>()

const filter = ref('')
const filtered = computed(() =>
  props.items.filter((item) => item.label.includes(filter.value))
)
</script>

<template>
  <div>
    <h1>{{ title }}</h1>
    <input v-model="filter" />
    <ul>
      <li v-for="item in filtered" :key="item.id" @click="emit('select', item.id)">
        {{ item.label }}
      </li>
    </ul>
    <template v-for="item in filtered" :key="item.id">
      <template v-slot:[item.label]>
        <span>{{ item.label }}</span>
      </template>
    </template>
  </div>
</template>

<style scoped>
.card {
  padding: 8px;
}
</style>
"#;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("sfc_parse");
    for (name, source) in [
        ("simple", SIMPLE_SFC),
        ("props", PROPS_SFC),
        ("complex", COMPLEX_SFC),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| parse_sfc(black_box(source), SfcParseOptions::default()).unwrap())
        });
    }
    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("sfc_compile");
    for (name, source) in [
        ("simple", SIMPLE_SFC),
        ("props", PROPS_SFC),
        ("complex", COMPLEX_SFC),
    ] {
        let descriptor = parse_sfc(source, SfcParseOptions::default()).unwrap();
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| compile_sfc(black_box(&descriptor), SfcCompileOptions::default()).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_compile);
criterion_main!(benches);
