//! Tag and directive tables shared by the parser, scope graph and transforms.

use phf::{phf_set, Set};

static HTML_TAGS: Set<&'static str> = phf_set! {
    "html", "body", "base", "head", "link", "meta", "style", "title", "address", "article",
    "aside", "footer", "header", "hgroup", "h1", "h2", "h3", "h4", "h5", "h6", "nav", "section",
    "div", "dd", "dl", "dt", "figcaption", "figure", "picture", "hr", "img", "li", "main", "ol",
    "p", "pre", "ul", "a", "b", "abbr", "bdi", "bdo", "br", "cite", "code", "data", "dfn", "em",
    "i", "kbd", "mark", "q", "rp", "rt", "ruby", "s", "samp", "small", "span", "strong", "sub",
    "sup", "time", "u", "var", "wbr", "area", "audio", "map", "track", "video", "embed",
    "object", "param", "source", "canvas", "script", "noscript", "del", "ins", "caption", "col",
    "colgroup", "table", "thead", "tbody", "td", "th", "tr", "button", "datalist", "fieldset",
    "form", "input", "label", "legend", "meter", "optgroup", "option", "output", "progress",
    "select", "textarea", "details", "dialog", "menu", "summary", "template", "blockquote",
    "iframe", "tfoot",
};

static SVG_TAGS: Set<&'static str> = phf_set! {
    "svg", "animate", "animateMotion", "animateTransform", "circle", "clipPath", "color-profile",
    "defs", "desc", "discard", "ellipse", "feBlend", "feColorMatrix", "feComponentTransfer",
    "feComposite", "feConvolveMatrix", "feDiffuseLighting", "feDisplacementMap",
    "feDistantLight", "feDropShadow", "feFlood", "feFuncA", "feFuncB", "feFuncG", "feFuncR",
    "feGaussianBlur", "feImage", "feMerge", "feMergeNode", "feMorphology", "feOffset",
    "fePointLight", "feSpecularLighting", "feSpotLight", "feTile", "feTurbulence", "filter",
    "foreignObject", "g", "hatch", "hatchpath", "image", "line", "linearGradient", "marker",
    "mask", "mesh", "meshgradient", "meshpatch", "meshrow", "metadata", "mpath", "path",
    "pattern", "polygon", "polyline", "radialGradient", "rect", "set", "solidcolor", "stop",
    "switch", "symbol", "text", "textPath", "tspan", "unknown", "use", "view",
};

static MATH_ML_TAGS: Set<&'static str> = phf_set! {
    "math", "mi", "mn", "mo", "ms", "mspace", "mtext", "menclose", "merror", "mfenced", "mfrac",
    "mpadded", "mphantom", "mroot", "mrow", "msqrt", "mstyle", "mmultiscripts", "mover", "mprescripts",
    "msub", "msubsup", "msup", "mtable", "mtd", "mtr", "mlongdiv", "mscarries", "mscarry", "msgroup",
    "mstack", "msline", "msrow", "semantics", "annotation", "annotation-xml",
};

static VOID_TAGS: Set<&'static str> = phf_set! {
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
};

static BUILTIN_DIRECTIVES: Set<&'static str> = phf_set! {
    "bind", "cloak", "else-if", "else", "for", "html", "if", "model", "on", "once", "pre",
    "show", "slot", "text", "memo", "is",
};

static BUILTIN_COMPONENTS: Set<&'static str> = phf_set! {
    "Transition", "TransitionGroup", "KeepAlive", "Suspense", "Teleport", "BaseTransition",
};

static RESERVED_PROPS: Set<&'static str> = phf_set! {
    "key", "ref", "ref_for", "ref_key", "onVnodeBeforeMount", "onVnodeMounted",
    "onVnodeBeforeUpdate", "onVnodeUpdated", "onVnodeBeforeUnmount", "onVnodeUnmounted",
};

#[inline]
pub fn is_html_tag(tag: &str) -> bool {
    HTML_TAGS.contains(tag)
}

#[inline]
pub fn is_svg_tag(tag: &str) -> bool {
    SVG_TAGS.contains(tag)
}

#[inline]
pub fn is_math_ml_tag(tag: &str) -> bool {
    MATH_ML_TAGS.contains(tag)
}

/// A "native" tag is any tag the platform renderer understands directly,
/// as opposed to a user component that must be resolved.
#[inline]
pub fn is_native_tag(tag: &str) -> bool {
    is_html_tag(tag) || is_svg_tag(tag) || is_math_ml_tag(tag)
}

#[inline]
pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(tag)
}

#[inline]
pub fn is_builtin_directive(name: &str) -> bool {
    BUILTIN_DIRECTIVES.contains(name)
}

#[inline]
pub fn is_builtin_tag(tag: &str) -> bool {
    BUILTIN_COMPONENTS.contains(tag)
}

#[inline]
pub fn is_reserved_prop(name: &str) -> bool {
    RESERVED_PROPS.contains(name)
}
