use leptos::*;

#[component]
pub fn Toolbar(open: ReadSignal<bool>) -> impl IntoView {
    view! {
        <nav class="bg-surface text-surface-on border-border dark:bg-container">
            <button class="bg-primary text-primary-on ring-ring hover:bg-primary/90">"Save"</button>
            <button class="bg-danger text-danger-on">"Delete"</button>
            <div class=("animate-slide-in-up", move || open.get())>
                <span class="text-muted accent-accent/50 animate-pulse">"Syncing"</span>
            </div>
        </nav>
    }
}
